mod bus;

pub use bus::{EditorSignal, ObserverId, SignalBus, SignalRecord, HISTORY_CAPACITY};
