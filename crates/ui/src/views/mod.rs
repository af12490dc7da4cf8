mod home;
mod lesson;
mod practice;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use lesson::LessonView;
pub use practice::PracticeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
