/// Colour tokens exposed to the stylesheet as CSS variables.
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub surface_raised: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub positive: &'static str,
    pub negative: &'static str,
    pub user_bubble: &'static str,
    pub assistant_bubble: &'static str,
}

pub const DARK: Palette = Palette {
    background: "#000000",
    surface: "#111827",
    surface_raised: "#1f2937",
    text: "#ffffff",
    text_muted: "#9ca3af",
    border: "#374151",
    accent: "#2563eb",
    positive: "#22c55e",
    negative: "#ef4444",
    user_bubble: "#2563eb",
    assistant_bubble: "#1f2937",
};

impl Palette {
    pub fn css(&self) -> String {
        format!(
            ":root {{\n\
             \x20   --color-bg: {};\n\
             \x20   --color-surface: {};\n\
             \x20   --color-surface-raised: {};\n\
             \x20   --color-text: {};\n\
             \x20   --color-text-muted: {};\n\
             \x20   --color-border: {};\n\
             \x20   --color-accent: {};\n\
             \x20   --color-positive: {};\n\
             \x20   --color-negative: {};\n\
             \x20   --color-bubble-user: {};\n\
             \x20   --color-bubble-assistant: {};\n\
             }}\n\
             body {{ background: var(--color-bg); color: var(--color-text); }}\n",
            self.background,
            self.surface,
            self.surface_raised,
            self.text,
            self.text_muted,
            self.border,
            self.accent,
            self.positive,
            self.negative,
            self.user_bubble,
            self.assistant_bubble,
        )
    }
}
