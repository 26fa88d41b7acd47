use tracing::{debug, warn};

/// Which screen is showing. The month is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    Input,
    Loading(i32),
    Result(i32),
    Exited,
}

/// Something that happened on the current screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NavigationEvent {
    DateConfirmed(i32),
    LoadingFinished(i32),
    Restart,
    Abandon,
}

/// Owns the current screen and moves it along as events come in
#[derive(Debug)]
pub(crate) struct Navigator {
    current: Screen,
}

impl Navigator {
    pub(crate) fn new(start: Screen) -> Self {
        Self { current: start }
    }

    pub(crate) fn current(&self) -> Screen {
        self.current
    }

    /// Apply an event. Events that make no sense on the current screen leave it unchanged.
    pub(crate) fn dispatch(&mut self, event: NavigationEvent) -> Screen {
        use NavigationEvent::*;
        let next = match (self.current, event) {
            (Screen::Exited, _) => None,
            (_, Abandon) => Some(Screen::Exited),
            (Screen::Input, DateConfirmed(month)) => Some(Screen::Loading(month)),
            (Screen::Loading(_), LoadingFinished(month)) => Some(Screen::Result(month)),
            (Screen::Result(_), Restart) => Some(Screen::Input),
            _ => None,
        };
        match next {
            Some(next) => {
                debug!("navigating from {:?} to {next:?} on {event:?}", self.current);
                self.current = next;
            }
            None => warn!("ignoring {event:?} on screen {:?}", self.current),
        }
        self.current
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Screen::Input)
    }
}
