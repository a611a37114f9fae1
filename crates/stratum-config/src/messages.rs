//! Token substitution for message templates.

/// Values substituted into a template.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageVars {
    /// XP granted by the triggering operation.
    pub xp: i64,
    /// Cumulative XP after the grant.
    pub current_xp: i64,
    /// XP remaining to the next level.
    pub xp_needed: i64,
    /// Level after the grant.
    pub level: u32,
    /// The level after the current one.
    pub next_level: u32,
}

/// Substitute `{xp}`, `{current_xp}`, `{xp_needed}`, `{level}` and
/// `{next_level}` tokens. Unrecognized tokens pass through untouched.
pub fn render(template: &str, vars: &MessageVars) -> String {
    template
        .replace("{xp}", &vars.xp.to_string())
        .replace("{current_xp}", &vars.current_xp.to_string())
        .replace("{xp_needed}", &vars.xp_needed.to_string())
        .replace("{next_level}", &vars.next_level.to_string())
        .replace("{level}", &vars.level.to_string())
}
