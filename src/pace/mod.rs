pub mod codec;
pub mod cursor;
pub mod validate;

pub use codec::{DEFAULT_DISTANCE, PaceCodec, StepDirection, format_pace, parse_pace, step_pace};
pub use cursor::time_to_add_from_cursor;
pub use validate::{is_valid_speed, is_valid_time};
