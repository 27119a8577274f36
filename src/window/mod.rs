use std::collections::HashSet;
use std::convert::TryFrom;
use std::time::{Duration, Instant};
use log::{debug, info};
use orom_miniquad::*;
use crate::rendering::surface::{BufferProvider, BufferProviderMut, SizedSurface};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    P,
    S,
    W
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMods {
    pub shift: bool,
    pub control: bool,
    pub option: bool,
    pub command: bool,
}

impl TryFrom<orom_miniquad::KeyCode> for KeyCode {
    type Error = ();

    fn try_from(value: orom_miniquad::KeyCode) -> Result<Self, Self::Error> {
        match value {
            orom_miniquad::KeyCode::Space => Ok(KeyCode::Space),
            orom_miniquad::KeyCode::Enter | orom_miniquad::KeyCode::KpEnter => Ok(KeyCode::Enter),
            orom_miniquad::KeyCode::Escape => Ok(KeyCode::Escape),
            orom_miniquad::KeyCode::Left => Ok(KeyCode::Left),
            orom_miniquad::KeyCode::Right => Ok(KeyCode::Right),
            orom_miniquad::KeyCode::Up => Ok(KeyCode::Up),
            orom_miniquad::KeyCode::Down => Ok(KeyCode::Down),
            orom_miniquad::KeyCode::A => Ok(KeyCode::A),
            orom_miniquad::KeyCode::D => Ok(KeyCode::D),
            orom_miniquad::KeyCode::P => Ok(KeyCode::P),
            orom_miniquad::KeyCode::S => Ok(KeyCode::S),
            orom_miniquad::KeyCode::W => Ok(KeyCode::W),
            _ => Err(())
        }
    }
}

impl From<orom_miniquad::KeyMods> for KeyMods {
    fn from(keymods: orom_miniquad::KeyMods) -> Self {
        Self {
            shift: keymods.shift,
            option: keymods.alt,
            control: keymods.ctrl,
            command: keymods.logo
        }
    }
}

/// Palette framebuffer plus the input state the game reads every frame
pub struct RetroBlitContext {
    buffer_width: usize,
    buffer_height: usize,
    colors: [u8; 256 * 3],
    buffer_pixels: Vec<u8>,
    keys_pressed: HashSet<KeyCode>,
    quit_requested: bool
}

impl SizedSurface for RetroBlitContext {
    fn get_width(&self) -> usize {
        self.buffer_width
    }

    fn get_height(&self) -> usize {
        self.buffer_height
    }
}

impl BufferProvider<u8> for RetroBlitContext {
    fn get_buffer(&self) -> &[u8] { &self.buffer_pixels }
}

impl BufferProviderMut<u8> for RetroBlitContext {
    fn get_buffer_mut(&mut self) -> &mut [u8] { &mut self.buffer_pixels }
}

impl RetroBlitContext {
    pub fn new(buffer_width: usize, buffer_height: usize) -> Self {
        Self {
            buffer_width,
            buffer_height,
            colors: [0u8; 256 * 3],
            buffer_pixels: vec![0u8; buffer_width * buffer_height],
            keys_pressed: HashSet::new(),
            quit_requested: false
        }
    }

    pub fn get_pixel(&self, x: i16, y: i16) -> Option<u8> {
        if (0..self.buffer_width as i16).contains(&x) && (0..self.buffer_height as i16).contains(&y) {
            Some(self.buffer_pixels[y as usize * self.buffer_width + x as usize])
        } else {
            None
        }
    }

    pub fn clear(&mut self, color_idx: u8) {
        for pixel in self.buffer_pixels.iter_mut() {
            *pixel = color_idx;
        }
    }

    pub fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        self.keys_pressed.contains(&key_code)
    }

    pub fn press_key(&mut self, key_code: KeyCode) {
        self.keys_pressed.insert(key_code);
    }

    pub fn release_key(&mut self, key_code: KeyCode) {
        self.keys_pressed.remove(&key_code);
    }

    pub fn set_palette(&mut self, index: u8, new_value: [u8; 3]) {
        let offset = Self::make_palette_offset(index);
        self.colors[offset..offset + 3].copy_from_slice(&new_value);
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    #[inline(always)]
    fn make_palette_offset(ix: u8) -> usize { ix as usize * 3 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode, KeyMods),
    KeyUp(KeyCode, KeyMods)
}

pub trait ContextHandler {
    fn get_window_title(&self) -> &'static str;
    fn get_buffer_dimensions(&self) -> (usize, usize);
    fn get_max_fps(&self) -> u32 { 60 }
    fn on_key_down(&mut self, _ctx: &mut RetroBlitContext, _key_code: KeyCode, _key_mods: KeyMods){}
    fn on_key_up(&mut self, _ctx: &mut RetroBlitContext, _key_code: KeyCode, _key_mods: KeyMods){}
    fn init(&mut self, ctx: &mut RetroBlitContext);
    fn update(&mut self, ctx: &mut RetroBlitContext, dt: f32);
}

/// Updates the held key set and forwards the event to the handler
pub fn dispatch_event(handler: &mut impl ContextHandler, ctx: &mut RetroBlitContext, event: InputEvent) {
    match event {
        InputEvent::KeyDown(key_code, key_mods) => {
            ctx.keys_pressed.insert(key_code);
            handler.on_key_down(ctx, key_code, key_mods);
        },
        InputEvent::KeyUp(key_code, key_mods) => {
            ctx.keys_pressed.remove(&key_code);
            handler.on_key_up(ctx, key_code, key_mods);
        }
    }
}

/// Longest step the clock reports, longer pauses (a suspended window) are cut down to it
pub const MAX_FRAME_DT: f32 = 0.25;

/// Measures time between ticks and sleeps so that ticks never come faster than `max_fps`.
/// A `max_fps` of zero leaves the loop uncapped.
pub struct FrameClock {
    frame_budget: Option<Duration>,
    last_instant: Instant,
    dt: f32,
    ticks: u64
}

impl FrameClock {
    pub fn new(max_fps: u32) -> Self {
        let frame_budget = if max_fps == 0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / max_fps as f64))
        };
        Self {
            frame_budget,
            last_instant: Instant::now(),
            dt: 0.0,
            ticks: 0
        }
    }

    pub fn tick(&mut self) -> f32 {
        if let Some(budget) = self.frame_budget {
            let elapsed = self.last_instant.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }
        let now = Instant::now();
        self.dt = now.duration_since(self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;
        self.ticks += 1;
        self.dt
    }

    /// Seconds between the two latest ticks
    pub fn dt(&self) -> f32 { self.dt }

    pub fn ticks(&self) -> u64 { self.ticks }
}

/// One loop iteration: pending events first, then the handler update, then the clock
pub fn run_frame<CtxHandler: ContextHandler>(
    handler: &mut CtxHandler,
    ctx: &mut RetroBlitContext,
    clock: &mut FrameClock,
    events: impl IntoIterator<Item=InputEvent>
) {
    for event in events {
        dispatch_event(handler, ctx, event);
    }
    handler.update(ctx, clock.dt());
    clock.tick();
}

pub struct Stage<CtxHandler: ContextHandler> {
    pipeline: Pipeline,
    bindings: Bindings,
    context_data: RetroBlitContext,
    handler: CtxHandler,
    clock: FrameClock,
    pending_events: Vec<InputEvent>,
    buffer_texture: Texture,
    colors_texture: Texture
}

impl<CtxHandler: ContextHandler> Stage<CtxHandler> {
    pub fn new(ctx: &mut Context, handler: CtxHandler) -> Stage<CtxHandler> {
        // the buffer goes straight to the default pass, so v runs top to bottom
        #[rustfmt::skip]
        let verts: &[f32] = &[
            /* pos         uv */
            -1.0, -1.0,    0.0, 1.0,
             1.0,  1.0,    1.0, 0.0,
            -1.0,  1.0,    0.0, 0.0,
             1.0, -1.0,    1.0, 1.0,
        ];

        let vertex_buffer = Buffer::immutable(
            ctx,
            BufferType::VertexBuffer,
            verts
        );

        let index_buffer = Buffer::immutable(
            ctx,
            BufferType::IndexBuffer,
            &[0u16, 1, 2, 0, 3, 1]
        );

        let (buffer_width, buffer_height) = handler.get_buffer_dimensions();
        let mut context_data = RetroBlitContext::new(buffer_width, buffer_height);

        let mut handler = handler;
        handler.init(&mut context_data);

        let colors_texture = Texture::from_data_and_format(
            ctx,
            &context_data.colors,
            TextureParams {
                format: TextureFormat::RGB8,
                wrap: TextureWrap::Clamp,
                filter: FilterMode::Nearest,
                width: 256,
                height: 1,
                depth: 1
            },
            TextureKind::Texture2D
        );

        let buffer_texture = Texture::from_data_and_format(
            ctx,
            &context_data.buffer_pixels,
            TextureParams {
                format: TextureFormat::Alpha,
                wrap: TextureWrap::Clamp,
                filter: FilterMode::Nearest,
                width: buffer_width as _,
                height: buffer_height as _,
                depth: 1
            },
            TextureKind::Texture2D
        );

        let bindings = Bindings {
            vertex_buffers: vec![vertex_buffer],
            index_buffer,
            images: vec![colors_texture, buffer_texture]
        };

        let shader = Shader::new(
            ctx,
            palette_shader::VERTEX,
            palette_shader::FRAGMENT,
            palette_shader::meta()
        ).unwrap_or_else(|e| panic!("failed to create the palette shader: {:?}", e));

        let pipeline = Pipeline::new(
            ctx,
            &[BufferLayout::default()],
            &[
                VertexAttribute::new("pos", VertexFormat::Float2),
                VertexAttribute::new("uv", VertexFormat::Float2),
            ],
            shader
        );

        let clock = FrameClock::new(handler.get_max_fps());
        info!("Window opened with a {}x{} buffer", buffer_width, buffer_height);

        Self {
            pipeline,
            bindings,
            context_data,
            handler,
            clock,
            pending_events: Vec::new(),
            buffer_texture,
            colors_texture
        }
    }
}

impl<CtxHandler: ContextHandler> EventHandler for Stage<CtxHandler> {
    fn update(&mut self, ctx: &mut Context) {
        run_frame(
            &mut self.handler,
            &mut self.context_data,
            &mut self.clock,
            self.pending_events.drain(..)
        );
        self.colors_texture.update(ctx, &self.context_data.colors);
        self.buffer_texture.update(ctx, &self.context_data.buffer_pixels);

        if self.context_data.is_quit_requested() {
            info!("Closing the window after {} frames", self.clock.ticks());
            ctx.quit();
        }
    }

    fn draw(&mut self, ctx: &mut Context) {
        ctx.begin_default_pass(PassAction::clear_color(0.0, 0.0, 0.0, 1.0));
        ctx.apply_pipeline(&self.pipeline);
        ctx.apply_bindings(&self.bindings);
        ctx.draw(0, 6, 1);
        ctx.end_render_pass();

        ctx.commit_frame();
    }

    fn key_down_event(
        &mut self,
        _ctx: &mut Context,
        keycode: orom_miniquad::KeyCode,
        keymods: orom_miniquad::KeyMods,
        repeat: bool,
    ) {
        if repeat {
            return;
        }
        if let Ok(key_code) = KeyCode::try_from(keycode) {
            debug!("Key down: {:?}", key_code);
            self.pending_events.push(InputEvent::KeyDown(key_code, keymods.into()));
        }
    }

    fn key_up_event(
        &mut self,
        _ctx: &mut Context,
        keycode: orom_miniquad::KeyCode,
        keymods: orom_miniquad::KeyMods
    ) {
        if let Ok(key_code) = KeyCode::try_from(keycode) {
            self.pending_events.push(InputEvent::KeyUp(key_code, keymods.into()));
        }
    }
}

mod palette_shader {
    use orom_miniquad::*;

    pub const VERTEX:&str = r#"#version 100
        attribute vec2 pos;
        attribute vec2 uv;

        varying lowp vec2 texcoord;

        void main() {
            gl_Position = vec4(pos, 0.0, 1.0);
            texcoord = uv;
        }
    "#;

    pub const FRAGMENT:&str = r#"#version 100
        varying lowp vec2 texcoord;

        uniform sampler2D colors;
        uniform sampler2D tex;

        lowp vec3 fetch(lowp vec2 texcoord) {
            lowp float idx = texture2D(tex, texcoord).a;
            lowp vec2 uv = vec2((idx * 255.0 + 0.5) / 256.0, 0.5);
            return texture2D(colors, uv).xyz;
        }

        void main() {
            gl_FragColor = vec4(fetch(texcoord), 1.0);
        }
    "#;

    pub fn meta() -> ShaderMeta {
        ShaderMeta {
            images: vec!["colors".to_string(), "tex".to_string()],
            uniforms: UniformBlockLayout { uniforms: Vec::new() }
        }
    }
}

pub fn start<CtxHandler: 'static + ContextHandler>(handler: CtxHandler) {
    let (buffer_width, buffer_height) = handler.get_buffer_dimensions();
    let conf = conf::Conf {
        window_title: handler.get_window_title().to_string(),
        window_width: (buffer_width * 2) as _,
        window_height: (buffer_height * 2) as _,
        high_dpi: true,
        fullscreen: false,
        sample_count: 1,
        window_resizable: true
    };

    orom_miniquad::start(conf, |mut ctx| {
        UserData::owning(Stage::new(&mut ctx, handler), ctx)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KeyRecorder {
        downs: Vec<KeyCode>,
        ups: Vec<KeyCode>,
        updates: u32
    }

    impl ContextHandler for KeyRecorder {
        fn get_window_title(&self) -> &'static str { "recorder" }
        fn get_buffer_dimensions(&self) -> (usize, usize) { (4, 4) }
        fn on_key_down(&mut self, _ctx: &mut RetroBlitContext, key_code: KeyCode, _key_mods: KeyMods) {
            self.downs.push(key_code);
        }
        fn on_key_up(&mut self, _ctx: &mut RetroBlitContext, key_code: KeyCode, _key_mods: KeyMods) {
            self.ups.push(key_code);
        }
        fn init(&mut self, _ctx: &mut RetroBlitContext) {}
        fn update(&mut self, ctx: &mut RetroBlitContext, _dt: f32) {
            self.updates += 1;
            ctx.get_buffer_mut()[0] = self.updates as u8;
        }
    }

    #[test]
    fn get_pixel_reads_row_major_and_rejects_out_of_bounds() {
        let mut ctx = RetroBlitContext::new(3, 2);
        ctx.clear(4);
        ctx.get_buffer_mut()[5] = 7;
        assert_eq!(ctx.get_pixel(2, 1), Some(7));
        assert_eq!(ctx.get_pixel(0, 1), Some(4));
        assert_eq!(ctx.get_pixel(-1, 0), None);
        assert_eq!(ctx.get_pixel(3, 1), None);
        assert_eq!(ctx.get_pixel(0, 2), None);
    }

    #[test]
    fn palette_entries_are_stored_per_index() {
        let mut ctx = RetroBlitContext::new(1, 1);
        ctx.set_palette(255, [1, 2, 3]);
        ctx.set_palette(0, [9, 8, 7]);
        assert_eq!(&ctx.colors[255 * 3..], &[1, 2, 3]);
        assert_eq!(&ctx.colors[..6], &[9, 8, 7, 0, 0, 0]);
    }

    #[test]
    fn run_frame_dispatches_events_before_update() {
        let mut handler = KeyRecorder { downs: Vec::new(), ups: Vec::new(), updates: 0 };
        let mut ctx = RetroBlitContext::new(4, 4);
        let mut clock = FrameClock::new(0);

        run_frame(
            &mut handler,
            &mut ctx,
            &mut clock,
            vec![
                InputEvent::KeyDown(KeyCode::W, KeyMods::default()),
                InputEvent::KeyDown(KeyCode::Space, KeyMods::default()),
                InputEvent::KeyUp(KeyCode::Space, KeyMods::default())
            ]
        );

        assert_eq!(handler.downs, vec![KeyCode::W, KeyCode::Space]);
        assert_eq!(handler.ups, vec![KeyCode::Space]);
        assert!(ctx.is_key_pressed(KeyCode::W));
        assert!(!ctx.is_key_pressed(KeyCode::Space));
        assert_eq!(handler.updates, 1);
        assert_eq!(ctx.get_pixel(0, 0), Some(1));
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn frame_clock_does_not_tick_faster_than_the_cap() {
        let mut clock = FrameClock::new(100);
        let started = Instant::now();
        for _ in 0..3 {
            clock.tick();
        }
        assert!(started.elapsed() >= Duration::from_millis(25));
        assert!(clock.dt() >= 0.009);
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn long_stall_is_reported_as_one_short_step() {
        let mut clock = FrameClock::new(0);
        std::thread::sleep(Duration::from_millis(400));
        assert_eq!(clock.tick(), MAX_FRAME_DT);
        assert!(clock.tick() < MAX_FRAME_DT);
    }

    #[test]
    fn unmapped_keys_are_rejected() {
        assert_eq!(KeyCode::try_from(orom_miniquad::KeyCode::Space), Ok(KeyCode::Space));
        assert_eq!(KeyCode::try_from(orom_miniquad::KeyCode::F1), Err(()));
    }

    #[test]
    fn quit_request_is_sticky() {
        let mut ctx = RetroBlitContext::new(1, 1);
        assert!(!ctx.is_quit_requested());
        ctx.request_quit();
        assert!(ctx.is_quit_requested());
    }
}
