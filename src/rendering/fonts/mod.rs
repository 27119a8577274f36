pub mod vector_font;

pub mod font_align {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum HorizontalAlignment {
        Left,
        Center,
        Right
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum VerticalAlignment {
        Top,
        Center,
        Bottom
    }
}
