//! Console icons with plain-text fallbacks for terminals without emoji.

use console::Emoji;

pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN] ");
pub static PROBE: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static FLASK: Emoji<'_, '_> = Emoji("🧪 ", "");
pub static QUESTION: Emoji<'_, '_> = Emoji("❓ ", "");
pub static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "");
