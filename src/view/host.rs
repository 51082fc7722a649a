use std::io::Write;

use crate::error::CalendarError;
use crate::view::calendar_view::CalendarView;
use crate::view::render::render_text;

pub const VIEW_TYPE: &str = "ramadan-calendar-view";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    pub view_type: String,
    pub display_text: String,
    pub icon: String,
}

impl ViewDescriptor {
    pub fn calendar() -> Self {
        Self {
            view_type: VIEW_TYPE.to_string(),
            display_text: "Ramadan 2026".to_string(),
            icon: "moon".to_string(),
        }
    }
}

/// Presentation side of the host application.
pub trait ViewHost {
    fn register_view(&mut self, descriptor: ViewDescriptor);
    fn reveal_view(&mut self, view_type: &str, view: &CalendarView) -> Result<(), CalendarError>;
    fn detach_views(&mut self, view_type: &str);
}

/// Prints the calendar as text to any writer.
pub struct TerminalHost<W: Write> {
    out: W,
    registered: Vec<ViewDescriptor>,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            registered: Vec::new(),
        }
    }

    pub fn registered(&self) -> &[ViewDescriptor] {
        &self.registered
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ViewHost for TerminalHost<W> {
    fn register_view(&mut self, descriptor: ViewDescriptor) {
        if !self.registered.iter().any(|d| d.view_type == descriptor.view_type) {
            tracing::debug!(view_type = %descriptor.view_type, "view registered");
            self.registered.push(descriptor);
        }
    }

    fn reveal_view(&mut self, view_type: &str, view: &CalendarView) -> Result<(), CalendarError> {
        let descriptor = self
            .registered
            .iter()
            .find(|d| d.view_type == view_type)
            .ok_or_else(|| CalendarError::ViewNotRegistered(view_type.to_string()))?;
        tracing::debug!(view = %descriptor.display_text, epoch = view.epoch(), "revealing view");
        self.out.write_all(render_text(view).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn detach_views(&mut self, view_type: &str) {
        self.registered.retain(|d| d.view_type != view_type);
    }
}
