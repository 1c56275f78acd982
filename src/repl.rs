// File: src/repl.rs
//
// Interactive REPL (Read-Eval-Print Loop) for the Rill language.
// Provides an interactive shell with:
// - Multi-line input support for loops and control structures
// - Command history with up/down arrow navigation
// - Special commands (:help, :clear, :quit, :vars, :reset)
// - Persistent variable state across inputs

use crate::interpreter::Interpreter;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// REPL session that maintains interpreter state and handles user interaction
pub struct Repl {
    interpreter: Interpreter,
    editor: DefaultEditor,
}

impl Repl {
    /// Creates a new REPL session with a fresh interpreter
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let editor = DefaultEditor::new()?;
        Ok(Repl { interpreter: Interpreter::new(), editor })
    }

    fn show_banner(&self) {
        println!("{}", format!("Rill REPL v{}", env!("CARGO_PKG_VERSION")).bright_cyan().bold());
        println!(
            "  {} Use {} for commands or {} to leave",
            "Welcome!".bright_green(),
            ":help".bright_yellow(),
            ":quit".bright_yellow()
        );
        println!("  {} Multi-line input: end with unclosed braces", "Tip:".bright_magenta());
        println!();
    }

    /// Starts the REPL loop
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.show_banner();

        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() {
                "rill> ".bright_green().to_string()
            } else {
                "....> ".bright_blue().to_string()
            };

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());

                    // Special commands only apply outside multi-line mode
                    if buffer.is_empty() && line.trim().starts_with(':') {
                        if self.handle_command(line.trim()) {
                            continue;
                        } else {
                            break; // :quit was called
                        }
                    }

                    buffer.push_str(&line);
                    buffer.push('\n');

                    if is_input_complete(&buffer) {
                        let source = std::mem::take(&mut buffer);
                        if !source.trim().is_empty() {
                            self.interpreter.run(&source);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C (input discarded, :quit to exit)".bright_yellow());
                    buffer.clear();
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    eprintln!("{} {}", "Error:".bright_red(), err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handles special REPL commands starting with ':'
    /// Returns true to continue the REPL, false to quit
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":help" | ":h" => {
                self.show_help();
                true
            }
            ":quit" | ":q" | ":exit" => {
                println!("{}", "Goodbye!".bright_cyan());
                false
            }
            ":clear" | ":c" => {
                print!("\x1B[2J\x1B[1;1H");
                self.show_banner();
                true
            }
            ":vars" | ":v" => {
                self.show_variables();
                true
            }
            ":reset" | ":r" => {
                self.interpreter = Interpreter::new();
                println!("{}", "Environment reset".bright_green());
                true
            }
            _ => {
                println!(
                    "{} Unknown command: {}. Type {} for available commands.",
                    "Error:".bright_red(),
                    cmd.bright_yellow(),
                    ":help".bright_yellow()
                );
                true
            }
        }
    }

    fn show_help(&self) {
        println!();
        println!("{}", "REPL Commands:".bright_cyan().bold());
        println!("  {} or :h   Display this help message", ":help".bright_yellow());
        println!("  {} or :q   Exit the REPL", ":quit".bright_yellow());
        println!("  {} or :c  Clear the screen", ":clear".bright_yellow());
        println!("  {} or :v   Show defined variables", ":vars".bright_yellow());
        println!("  {} or :r  Reset the environment", ":reset".bright_yellow());
        println!();
        println!("{}", "Examples:".bright_cyan().bold());
        println!("  {}", "rill> x = 42".dimmed());
        println!("  {}", "rill> for i = 0 to 3 {".dimmed());
        println!("  {}", "....>     print \"i is\", i".dimmed());
        println!("  {}", "....> }".dimmed());
        println!();
    }

    /// Displays all currently defined variables in the environment
    fn show_variables(&self) {
        let bindings = self.interpreter.env.bindings();
        if bindings.is_empty() {
            println!("  {}", "(no variables defined)".dimmed());
            return;
        }
        println!();
        println!("{}", "Defined Variables:".bright_cyan().bold());
        for (name, value) in bindings {
            println!("  {} = {}", name.bright_yellow(), value.to_string().bright_white());
        }
        println!();
    }
}

/// Checks if the input is syntactically complete: all braces and parentheses
/// balanced outside of string literals and comments
fn is_input_complete(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return true;
    }

    let mut brace_count = 0i32;
    let mut paren_count = 0i32;
    let mut in_string = false;
    let mut escape_next = false;
    let mut in_comment = false;

    for ch in trimmed.chars() {
        if in_comment {
            if ch == '\n' {
                in_comment = false;
            }
            continue;
        }

        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '#' if !in_string => in_comment = true,
            '{' if !in_string => brace_count += 1,
            '}' if !in_string => brace_count -= 1,
            '(' if !in_string => paren_count += 1,
            ')' if !in_string => paren_count -= 1,
            _ => {}
        }
    }

    !in_string && brace_count <= 0 && paren_count <= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_input_is_complete() {
        assert!(is_input_complete("x = 1\n"));
        assert!(is_input_complete("while x < 3 { x = x + 1 }\n"));
    }

    #[test]
    fn unclosed_brace_keeps_reading() {
        assert!(!is_input_complete("for i = 0 to 3 {\n"));
        assert!(!is_input_complete("if x < (1 + \n"));
    }

    #[test]
    fn braces_inside_strings_do_not_count() {
        assert!(is_input_complete("print \"{ not a block\"\n"));
        assert!(is_input_complete("x = 1 # comment with {\n"));
    }
}
