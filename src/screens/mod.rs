mod input;
mod loading;
mod result;

pub(crate) use input::prompt_birth_date;
pub(crate) use loading::{LoadingOutcome, LoadingScene, LoadingScreen, MAX_SPEED};
pub(crate) use result::{ResultAction, ResultView};
