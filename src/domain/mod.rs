pub mod record;
pub mod category;
pub mod event;
pub mod club;
pub mod team_member;
pub mod announcement;

pub use record::{decode_record, decode_records, Collection, Record, RecordFlag, SortDirection};
pub use category::*;
pub use event::*;
pub use club::*;
pub use team_member::*;
pub use announcement::*;
