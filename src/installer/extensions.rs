//! Companion extensions the installed configuration expects.

use std::io::{self, Write};

/// Extension IDs the settings and keybindings rely on.
pub const RECOMMENDED_EXTENSIONS: [&str; 3] = [
    "asvetliakov.vscode-neovim",
    "alefragnani.Bookmarks",
    "JulianIaquinandi.nvim-ui-modifier",
];

/// Print the recommended extensions and how to install them.
///
/// Nothing is checked against the editor; the list is static.
pub fn print_extension_requirements<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n📦 Required Extensions:")?;
    for extension in RECOMMENDED_EXTENSIONS {
        writeln!(out, "  - {extension}")?;
    }

    writeln!(out, "\nPlease make sure these extensions are installed in VSCode.")?;
    writeln!(out, "You can install them via VSCode Extensions marketplace or using:")?;
    writeln!(out, "code --install-extension <extension-id>")
}
