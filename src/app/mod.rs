mod phases;
mod root;
mod state;

pub(crate) use state::{
    AppState, CustomerView, FailedState, LoadOutcome, LoadedData, LoadingState, RunningState,
};

pub use root::App;
