mod style;

pub use style::{ComputedStyle, Display, Height, Style};
