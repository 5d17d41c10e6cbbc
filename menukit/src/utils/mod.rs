pub mod raw_mode;
pub use raw_mode::{ModeControl, RawModeGuard};

pub mod sanitize;
pub use sanitize::{DesiredType, FilterError, Sanitize};

pub mod style;
pub use style::{Style, Theme, UnknownStyle};

pub mod terminal;
pub use terminal::{ClearMode, Console, KeyMode};
