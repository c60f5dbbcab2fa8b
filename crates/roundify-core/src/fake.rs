//! In-memory overlay used by unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::CornerMasks;
use crate::window::{Overlay, WindowResult};

/// A platform call recorded by [`FakeOverlay`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Call {
    Topmost,
    Show,
    Hide,
    Masks(f64),
    Destroyed,
}

pub(crate) type CallLog = Rc<RefCell<Vec<(usize, Call)>>>;

pub(crate) struct FakeOverlay {
    id: usize,
    pub(crate) fail_topmost: bool,
    pub(crate) log: CallLog,
}

impl FakeOverlay {
    pub(crate) fn new(id: usize) -> Self {
        Self::with_log(id, CallLog::default())
    }

    /// Creates an overlay that records into a log shared with other fakes.
    pub(crate) fn with_log(id: usize, log: CallLog) -> Self {
        Self {
            id,
            fail_topmost: false,
            log,
        }
    }

    pub(crate) fn count(&self, call: Call) -> usize {
        count(&self.log, self.id, call)
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push((self.id, call));
    }
}

/// Number of times `id` made `call`.
pub(crate) fn count(log: &CallLog, id: usize, call: Call) -> usize {
    log.borrow()
        .iter()
        .filter(|(i, c)| *i == id && *c == call)
        .count()
}

impl Overlay for FakeOverlay {
    fn id(&self) -> usize {
        self.id
    }

    fn force_topmost(&self) -> WindowResult<()> {
        self.record(Call::Topmost);
        if self.fail_topmost {
            return Err("window handle is invalid".into());
        }
        Ok(())
    }

    fn show(&mut self) {
        self.record(Call::Show);
    }

    fn hide(&mut self) {
        self.record(Call::Hide);
    }

    fn apply_masks(&mut self, masks: &CornerMasks) -> WindowResult<()> {
        self.record(Call::Masks(masks.radius()));
        Ok(())
    }
}

impl Drop for FakeOverlay {
    fn drop(&mut self) {
        self.record(Call::Destroyed);
    }
}
