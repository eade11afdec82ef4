mod jsonl;
mod list;
mod replay;
mod types;

pub use jsonl::{decode_change_jsonl_line, encode_change_jsonl_line};
pub use list::{AppendOutcome, ChangeList, ChangeListError};
pub use replay::{apply_change_list, ReplayError, ReplayRejection};
pub use types::{
    ChangeKind, ChangeRecord, EXPLORATION_PROPERTY_NAMES, GADGET_PROPERTY_NAMES,
    STATE_PROPERTY_NAMES,
};
