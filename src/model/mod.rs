pub mod config {
    pub use hexcell_core::config::*;
}
pub mod grid {
    pub use hexcell_core::grid::*;
}
pub mod neighbors {
    pub use hexcell_core::neighbors::*;
}
pub mod rules {
    pub use hexcell_core::rules::*;
}
pub mod generator {
    pub use hexcell_core::generator::*;
}
pub mod step {
    pub use hexcell_core::step::*;
}
pub mod palette {
    pub use hexcell_core::palette::*;
    pub use hexcell_data::{Palette, Rgb, BACKGROUND_COLOR};
}
pub mod rule_file {
    pub use hexcell_io::rule_file::*;
}
pub mod library {
    pub use hexcell_io::library::*;
}
pub mod frame {
    pub use hexcell_io::Frame;
}
