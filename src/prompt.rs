use std::io::{self, Write};

use crate::symtab::SymtabStack;

/// Prints the primary and continuation prompts. The strings come from the
/// `PS1`/`PS2` shell variables when set, else from the configured defaults.
pub struct ShellPrompt {
    default_ps1: String,
    default_ps2: String,
}

impl ShellPrompt {
    pub fn new(default_ps1: &str, default_ps2: &str) -> Self {
        ShellPrompt {
            default_ps1: default_ps1.to_string(),
            default_ps2: default_ps2.to_string(),
        }
    }

    pub fn ps1<'a>(&'a self, symtab: &'a SymtabStack) -> &'a str {
        symtab
            .get("PS1")
            .and_then(|e| e.value_str())
            .unwrap_or(&self.default_ps1)
    }

    pub fn ps2<'a>(&'a self, symtab: &'a SymtabStack) -> &'a str {
        symtab
            .get("PS2")
            .and_then(|e| e.value_str())
            .unwrap_or(&self.default_ps2)
    }

    pub fn show_ps1(&self, symtab: &SymtabStack) {
        print!("{}", self.ps1(symtab));
        io::stdout().flush().unwrap();
    }

    pub fn show_ps2(&self, symtab: &SymtabStack) {
        print!("{}", self.ps2(symtab));
        io::stdout().flush().unwrap();
    }
}
