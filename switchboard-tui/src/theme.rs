//! Graphite theme and status color utilities.

use ratatui::style::Color;
use switchboard_core::{ApiKeyStatus, ChannelStatus, TraceStatus, UserStatus};

#[derive(Debug, Clone)]
pub struct GraphiteTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl GraphiteTheme {
    pub fn graphite() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 20),
            bg_highlight: Color::Rgb(38, 40, 44),
            primary: Color::Rgb(130, 170, 255),
            primary_dim: Color::Rgb(70, 95, 150),
            secondary: Color::Rgb(195, 150, 255),
            success: Color::Rgb(120, 220, 130),
            warning: Color::Rgb(240, 200, 90),
            error: Color::Rgb(240, 110, 110),
            info: Color::Rgb(130, 170, 255),
            text: Color::Rgb(225, 225, 230),
            text_dim: Color::Rgb(130, 132, 140),
            border: Color::Rgb(70, 72, 80),
            border_focus: Color::Rgb(130, 170, 255),
        }
    }
}

pub fn api_key_status_color(status: ApiKeyStatus, theme: &GraphiteTheme) -> Color {
    match status {
        ApiKeyStatus::Enabled => theme.success,
        ApiKeyStatus::Disabled => theme.text_dim,
        ApiKeyStatus::Expired => theme.warning,
        ApiKeyStatus::Exhausted => theme.error,
    }
}

pub fn channel_status_color(status: ChannelStatus, theme: &GraphiteTheme) -> Color {
    match status {
        ChannelStatus::Enabled => theme.success,
        ChannelStatus::Disabled => theme.text_dim,
        ChannelStatus::AutoDisabled => theme.error,
    }
}

pub fn user_status_color(status: UserStatus, theme: &GraphiteTheme) -> Color {
    match status {
        UserStatus::Active => theme.success,
        UserStatus::Suspended => theme.warning,
    }
}

pub fn trace_status_color(status: TraceStatus, theme: &GraphiteTheme) -> Color {
    match status {
        TraceStatus::Succeeded => theme.success,
        TraceStatus::UpstreamError => theme.error,
        TraceStatus::RateLimited => theme.warning,
        TraceStatus::Rejected => theme.warning,
        TraceStatus::Canceled => theme.text_dim,
    }
}
