use crate::apply::{push_styles, ApplyOutcome, ApplyState, RenderTarget};
use crate::color::Color;
use crate::defaults::ThemeVariant;
use crate::record::Theme;
use crate::sync::{sync_palette, SyncReport};
use crate::table::{ColorTable, Surface};

/// Owner of the active theme and the color table the renderer reads.
///
/// Everything that changes the theme goes through `&mut ThemeContext`, so a
/// load and an apply can never interleave.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    current: Theme,
    table: ColorTable,
    apply_state: ApplyState,
}

impl ThemeContext {
    /// Starts on the dark default, already pushed into the color table.
    pub fn new() -> Self {
        Self::with_variant(ThemeVariant::Dark)
    }

    pub fn with_variant(variant: ThemeVariant) -> Self {
        let mut context = Self {
            current: variant.build(),
            table: ColorTable::new(),
            apply_state: ApplyState::Idle,
        };
        context.resync(None);
        tracing::debug!("created default theme '{}'", context.current.name);
        context
    }

    pub fn current_theme(&self) -> &Theme {
        &self.current
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.table
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.table.get(index).map(|entry| entry.color)
    }

    pub fn apply_state(&self) -> ApplyState {
        self.apply_state
    }

    /// Replaces the current theme and syncs the palette against it. The
    /// previous theme is returned to the caller.
    pub fn install(&mut self, theme: Theme, surface: Option<&dyn Surface>) -> (Theme, SyncReport) {
        let previous = std::mem::replace(&mut self.current, theme);
        let report = self.resync(surface);
        (previous, report)
    }

    /// Installs the built-in `variant` without applying it.
    pub fn reset_to_default(&mut self, variant: ThemeVariant) -> SyncReport {
        self.install(variant.build(), None).1
    }

    pub fn resync(&mut self, surface: Option<&dyn Surface>) -> SyncReport {
        sync_palette(&mut self.current, &mut self.table, surface)
    }

    /// Pushes the current theme onto the GUI, or marks the request pending
    /// when the environment is not ready yet.
    pub fn apply(&mut self, target: &mut dyn RenderTarget) -> ApplyOutcome {
        if !target.is_ready() {
            tracing::debug!("rendering environment not ready, deferring theme apply");
            self.mark_pending();
            return ApplyOutcome::Deferred;
        }

        sync_palette(&mut self.current, &mut self.table, target.surface());
        push_styles(&self.current, target)
    }

    pub(crate) fn mark_pending(&mut self) {
        self.apply_state = ApplyState::Pending;
    }

    /// Runs a deferred apply exactly once. `None` when nothing was pending.
    pub fn apply_pending(&mut self, target: &mut dyn RenderTarget) -> Option<ApplyOutcome> {
        if self.apply_state != ApplyState::Pending {
            return None;
        }
        self.apply_state = ApplyState::Idle;
        Some(self.apply(target))
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::{FakeSession, FakeTarget};
    use crate::apply::WidgetRole;
    use crate::table::COL_BG;

    #[test]
    fn starts_on_synced_dark_default() {
        let context = ThemeContext::new();
        assert_eq!(context.current_theme(), &Theme::dark_default());
        assert_eq!(context.color(COL_BG), Some(Theme::dark_default().bg_color));
        assert_eq!(context.apply_state(), ApplyState::Idle);
    }

    #[test]
    fn apply_before_ready_is_deferred_then_flushed_once() {
        let mut context = ThemeContext::new();
        let mut target = FakeTarget::not_ready();

        assert_eq!(context.apply(&mut target), ApplyOutcome::Deferred);
        assert_eq!(context.apply_state(), ApplyState::Pending);
        assert_eq!(target.flushes, 0);

        target.ready = true;
        target.sessions.push(FakeSession::with(&[WidgetRole::ChatView]));
        assert_eq!(
            context.apply_pending(&mut target),
            Some(ApplyOutcome::Applied {
                sessions: 1,
                widgets: 1
            })
        );
        assert_eq!(context.apply_state(), ApplyState::Idle);
        assert_eq!(context.apply_pending(&mut target), None);
        assert_eq!(target.flushes, 1);
    }

    #[test]
    fn apply_skips_missing_widgets() {
        let mut context = ThemeContext::new();
        let mut target = FakeTarget::ready();
        target.sessions.push(FakeSession::with(&[
            WidgetRole::InputBox,
            WidgetRole::UserTree,
        ]));
        target.sessions.push(FakeSession::default());

        let outcome = context.apply(&mut target);
        assert_eq!(
            outcome,
            ApplyOutcome::Applied {
                sessions: 2,
                widgets: 2
            }
        );
        assert_eq!(target.main_window, Some(context.current_theme().bg_color));
        let styled: Vec<_> = target.sessions[0].styled.iter().map(|(role, _)| *role).collect();
        assert_eq!(styled, vec![WidgetRole::InputBox, WidgetRole::UserTree]);
        assert!(target.sessions[1].styled.is_empty());
        assert!(context.color_table().pixel(COL_BG).is_some());
    }

    #[test]
    fn install_returns_previous_theme() {
        let mut context = ThemeContext::new();
        let mut light = Theme::light_default();
        light.name = "Bright".into();
        let (previous, _) = context.install(light, None);
        assert_eq!(previous.name, "Default Dark");
        assert_eq!(context.current_theme().name, "Bright");
        assert_eq!(context.color(COL_BG), Some(Color::WHITE));
    }

    #[test]
    fn reset_to_default_replaces_loaded_theme() {
        let mut context = ThemeContext::new();
        let mut night = Theme::dark_default();
        night.name = "Night".into();
        night.bg_color = Color::BLACK;
        night.text_colors[2] = Color::BLACK;
        context.install(night, None);
        assert_eq!(context.color(2), Some(context.current_theme().fg_color));

        let report = context.reset_to_default(ThemeVariant::Light);
        assert!(report.corrected_slots.is_empty());
        assert_eq!(context.current_theme(), &Theme::light_default());
        assert_eq!(context.color(COL_BG), Some(Color::WHITE));
        assert_eq!(context.color(2), Some(Theme::light_default().text_colors[2]));
        assert_eq!(context.apply_state(), ApplyState::Idle);
    }
}
