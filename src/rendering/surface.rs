pub trait SizedSurface {
    fn get_width(&self) -> usize;
    fn get_height(&self) -> usize;
}

pub trait BufferProvider<T> {
    fn get_buffer(&self) -> &[T];
}

pub trait BufferProviderMut<T> {
    fn get_buffer_mut(&mut self) -> &mut [T];
}
