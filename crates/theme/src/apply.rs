use crate::color::Color;
use crate::record::Theme;
use crate::table::Surface;

/// Whether an apply request is waiting for the rendering environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyState {
    #[default]
    Idle,
    Pending,
}

/// Widgets a chat session may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetRole {
    ChatView,
    InputBox,
    UserTree,
    TopicEntry,
    MainTable,
    UserBox,
    Notebook,
    TopicBar,
    ProgressBar,
    NickBox,
}

impl WidgetRole {
    pub const ALL: [WidgetRole; 10] = [
        WidgetRole::ChatView,
        WidgetRole::InputBox,
        WidgetRole::UserTree,
        WidgetRole::TopicEntry,
        WidgetRole::MainTable,
        WidgetRole::UserBox,
        WidgetRole::Notebook,
        WidgetRole::TopicBar,
        WidgetRole::ProgressBar,
        WidgetRole::NickBox,
    ];
}

/// Colors and font to push onto one widget. `None` leaves that property
/// alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetStyle {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub font: Option<String>,
}

impl WidgetStyle {
    fn colors(background: Color, foreground: Color) -> Self {
        Self {
            background: Some(background),
            foreground: Some(foreground),
            font: None,
        }
    }

    fn background(background: Color) -> Self {
        Self {
            background: Some(background),
            ..Self::default()
        }
    }

    pub fn for_role(theme: &Theme, role: WidgetRole) -> Self {
        match role {
            WidgetRole::ChatView => Self {
                font: Some(theme.fonts.normal.clone()).filter(|font| !font.is_empty()),
                ..Self::colors(theme.bg_color, theme.fg_color)
            },
            WidgetRole::InputBox | WidgetRole::TopicEntry => {
                Self::colors(theme.input_bg, theme.input_fg)
            }
            WidgetRole::UserTree => Self::colors(theme.nicklist_bg, theme.nicklist_fg),
            WidgetRole::MainTable => Self::background(theme.bg_color),
            WidgetRole::UserBox | WidgetRole::NickBox => Self::background(theme.nicklist_bg),
            WidgetRole::Notebook | WidgetRole::ProgressBar => {
                Self::colors(theme.bg_color, theme.fg_color)
            }
            WidgetRole::TopicBar => Self::background(theme.input_bg),
        }
    }
}

/// One open window/session as seen by the theme layer.
pub trait SessionView {
    fn has_widget(&self, role: WidgetRole) -> bool;

    fn style_widget(&mut self, role: WidgetRole, style: &WidgetStyle);
}

/// The GUI environment themes are applied to.
pub trait RenderTarget {
    /// `false` until the toolkit is initialized.
    fn is_ready(&self) -> bool;

    fn surface(&self) -> Option<&dyn Surface>;

    fn style_main_window(&mut self, background: Color);

    fn sessions(&mut self) -> Vec<&mut dyn SessionView>;

    /// Queue redraws and process pending updates.
    fn flush(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Deferred,
    Applied { sessions: usize, widgets: usize },
}

/// Pushes `theme` onto the main window and every widget each session holds.
pub(crate) fn push_styles(theme: &Theme, target: &mut dyn RenderTarget) -> ApplyOutcome {
    target.style_main_window(theme.bg_color);

    let mut sessions = 0;
    let mut widgets = 0;
    for session in target.sessions() {
        sessions += 1;
        for role in WidgetRole::ALL {
            if !session.has_widget(role) {
                continue;
            }
            session.style_widget(role, &WidgetStyle::for_role(theme, role));
            widgets += 1;
        }
    }
    tracing::debug!(sessions, widgets, "applied theme '{}'", theme.name);

    target.flush();
    ApplyOutcome::Applied { sessions, widgets }
}
