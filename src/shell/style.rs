//! ANSI styling for banners and prompts.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const BOLD_BLUE: &str = "\x1b[1;94m";

const RAINBOW: [&str; 5] = [
    "\x1b[91m", // red
    "\x1b[92m", // green
    "\x1b[96m", // cyan
    "\x1b[94m", // blue
    "\x1b[95m", // magenta
];

/// Color each non-space character in turn; spaces don't advance the cycle.
pub fn rainbow_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 6);
    let mut idx = 0;
    for ch in text.chars() {
        if ch == ' ' {
            out.push(ch);
        } else {
            out.push_str(RAINBOW[idx % RAINBOW.len()]);
            out.push(ch);
            idx += 1;
        }
    }
    out.push_str(RESET);
    out
}

/// `=` rule used around headers.
pub fn rule() -> String {
    "=".repeat(50)
}
