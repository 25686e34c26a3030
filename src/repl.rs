use std::io;

use crate::config::Config;
use crate::lexer::Tokenizer;
use crate::parser::parse_simple_command;
use crate::prompt::ShellPrompt;
use crate::reader::read_logical_line;
use crate::source::Source;
use crate::symtab::{EntryFlags, SymtabStack};

/// Read-parse-print loop over standard input. Each logical line is scanned
/// into simple-command trees, which are dumped back out; interactive
/// sessions get prompts, piped input does not.
pub fn start(config: Config) {
    let mut symtab = SymtabStack::new(config.symtab_backend);
    init_symtab(&mut symtab, &config);

    let prompt = ShellPrompt::new(&config.prompt, &config.prompt2);
    let mut tokenizer = Tokenizer::with_limits(config.token_buf_init, config.token_buf_max);
    let interactive = unsafe { libc::isatty(libc::STDIN_FILENO) } == 1;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        if interactive {
            prompt.show_ps1(&symtab);
        }
        let line = match read_logical_line(&mut input, || {
            if interactive {
                prompt.show_ps2(&symtab);
            }
        }) {
            Ok(Some(line)) => line,
            Ok(None) => {
                if interactive {
                    println!();
                }
                break;
            }
            Err(e) => {
                eprintln!("minish: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        run_line(&mut tokenizer, &line);
    }
}

/// Populate the global scope: OS environment first, then `PS1`/`PS2` and
/// any `env.*` entries from the config file, which win over inherited
/// values.
fn init_symtab(symtab: &mut SymtabStack, config: &Config) {
    symtab.import_os_environ();

    let _ = symtab.add("PS1").set_value(&config.prompt);
    let _ = symtab.add("PS2").set_value(&config.prompt2);

    for (name, val) in &config.env_vars {
        let entry = symtab.add(name);
        if entry.set_value(val).is_ok() {
            entry.flags.insert(EntryFlags::EXPORT);
        }
    }
}

fn run_line(tokenizer: &mut Tokenizer, line: &str) {
    let mut src = Source::new(line);
    loop {
        match parse_simple_command(tokenizer, &mut src) {
            Ok(Some(cmd)) => print!("{}", cmd),
            Ok(None) => break,
            Err(e) => {
                eprintln!("minish: {}", e);
                break;
            }
        }
    }
}
