//! Shared UI icons.
//!
//! Each icon falls back to plain ASCII on terminals without emoji support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">>");

// Step indicators
pub static UPLOAD: Emoji<'_, '_> = Emoji("📂 ", "[UP]");
pub static SCRIPT: Emoji<'_, '_> = Emoji("📝 ", "[TXT]");
pub static VOICE: Emoji<'_, '_> = Emoji("🔊 ", "[VOX]");
pub static PHONE: Emoji<'_, '_> = Emoji("📞 ", "[TEL]");
