mod home;
mod play;
mod snapshot;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use play::PlayView;
pub use snapshot::{use_event_burst, use_snapshot_provider};
pub use state::{ViewError, ViewState, view_state_from_resource};
