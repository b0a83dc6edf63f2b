mod error;

use error::Error;
use mathpad_compute::numerical::fmt::{FormatOptionsBuilder, NumberFormat, Scientific};
use mathpad_editor::{
    edit::{CycleDirection, Direction},
    node::{NodeId, NodeKind},
    Calculator,
    CalculatorOptions,
    Key,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Each line is a sequence of keys: digits, letters, + - * / = ( ) ^ and `,`.
Typing `/` twice turns the division into a fraction, and `;` starts a new line
of a system of equations. Whitespace is ignored.

Lines starting with `:` are commands:
  :calc                 calculate the expression
  :left :right :up :down
                        move the caret
  :tab :backtab         cycle through every node
  :del                  delete the active node
  :frac :pow :sqrt :sup :sub :paren
                        insert a structure
  :fn <name>            insert a function
  :select <id> [offset] make a node active, such as `n3` or `root`
  :hover [id]           highlight a node, or clear the highlight
  :undo :redo           undo or redo an edit
  :clear                clear the expression
  :show                 print the markup and the evaluable text
  :tree                 print every node
  :history              print the calculations so far
  :quit                 exit";

/// What to do after running a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Turns a command's success flag into a result.
fn ran(command: &str, applied: bool) -> Result<Flow, Error> {
    if applied {
        Ok(Flow::Continue)
    } else {
        Err(Error::Ignored(format!(":{}", command)))
    }
}

/// Calculates the expression, printing the result, and the full report if it failed.
fn calculate(calculator: &mut Calculator) {
    println!("{}", calculator.calculate());
    if let Some(err) = calculator.last_error() {
        eprint!("{}", err.report());
    }
}

/// Prints every node of the tree, indented by depth.
fn print_tree(calculator: &Calculator) {
    fn print_node(calculator: &Calculator, id: NodeId, depth: usize) {
        let Some(node) = calculator.tree().get(id) else {
            return;
        };
        let marker = if calculator.active() == Some(id) { " <" } else { "" };
        println!("{}{} {} {:?}{}", "  ".repeat(depth), node.id, node.kind, node.value, marker);
        for &child in &node.children {
            print_node(calculator, child, depth + 1);
        }
    }
    print_node(calculator, NodeId::ROOT, 0);
}

/// Runs a `:` command.
fn run_command(calculator: &mut Calculator, command: &str, args: &[&str]) -> Result<Flow, Error> {
    let applied = match command {
        "calc" | "enter" => {
            calculate(calculator);
            true
        },
        "left" => calculator.navigate(Direction::Left),
        "right" => calculator.navigate(Direction::Right),
        "up" => calculator.navigate(Direction::Up),
        "down" => calculator.navigate(Direction::Down),
        "tab" => calculator.cycle(CycleDirection::Forward),
        "backtab" => calculator.cycle(CycleDirection::Backward),
        "del" | "delete" | "backspace" => calculator.delete(),
        "frac" => calculator.insert_structure(NodeKind::Fraction, None),
        "pow" => calculator.insert_structure(NodeKind::Power, None),
        "sqrt" => calculator.insert_structure(NodeKind::Sqrt, None),
        "sup" => calculator.insert_structure(NodeKind::Superscript, None),
        "sub" => calculator.insert_structure(NodeKind::Subscript, None),
        "paren" => calculator.insert_structure(NodeKind::Group, None),
        "fn" => {
            let name = args.first().ok_or_else(|| Error::MissingArgument {
                command: command.to_string(),
                expected: "a function name",
            })?;
            calculator.insert_structure(NodeKind::Function, Some(*name))
        },
        "select" => {
            let id = args.first()
                .ok_or_else(|| Error::MissingArgument {
                    command: command.to_string(),
                    expected: "a node id",
                })?
                .parse::<NodeId>()?;
            match args.get(1) {
                Some(offset) => {
                    let offset = offset.parse().map_err(|_| Error::BadOffset(offset.to_string()))?;
                    calculator.set_active_at(id, offset)
                },
                None => calculator.set_active(id),
            }
        },
        "hover" => {
            let id = args.first().map(|id| id.parse::<NodeId>()).transpose()?;
            calculator.set_hover(id)
        },
        "undo" => calculator.undo(),
        "redo" => calculator.redo(),
        "clear" => {
            calculator.clear();
            true
        },
        "show" => {
            println!("{}", calculator.render_markup());
            println!("{}", calculator.to_evaluable_string());
            true
        },
        "tree" => {
            print_tree(calculator);
            true
        },
        "history" => {
            for entry in calculator.history() {
                println!("{} => {}", entry.input, entry.output);
            }
            true
        },
        "help" => {
            println!("{}", HELP);
            true
        },
        "quit" | "exit" => return Ok(Flow::Quit),
        command => return Err(Error::UnknownCommand(command.to_string())),
    };
    ran(command, applied)
}

/// Runs one line of input: a `:` command, or a sequence of keys.
fn run_line(calculator: &mut Calculator, line: &str) -> Result<Flow, Error> {
    let line = line.trim();
    if let Some(command) = line.strip_prefix(':') {
        let words = command.split_whitespace().collect::<Vec<_>>();
        let Some((name, args)) = words.split_first() else {
            return Err(Error::UnknownCommand(String::new()));
        };
        return run_command(calculator, name, args);
    }

    for c in line.chars().filter(|c| !c.is_whitespace()) {
        let key = Key::Char(c);
        if key.command(calculator.state()).is_none() {
            return Err(Error::UnboundKey(c));
        }
        if !calculator.key(key) {
            return Err(Error::Ignored(c.to_string()));
        }
    }
    Ok(Flow::Continue)
}

/// Runs every line of a script, reporting errors and carrying on.
fn run_script(calculator: &mut Calculator, input: &str) {
    for line in input.lines() {
        match run_line(calculator, line) {
            Ok(Flow::Continue) => (),
            Ok(Flow::Quit) => break,
            Err(err) => err.report_to_stderr(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let format = FormatOptionsBuilder::new()
        .number(NumberFormat::Auto)
        .scientific(Scientific::Times)
        .precision(6)
        .build();
    let options = CalculatorOptions::default()
        .into_builder()
        .format(format)
        .build();
    let mut calculator = Calculator::with_options(options);

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run script file
        match fs::read_to_string(&filename) {
            Ok(input) => run_script(&mut calculator, &input),
            Err(source) => Error::Io { path: filename, source }.report_to_stderr(),
        }
    } else if !io::stdin().is_terminal() {
        // read script from stdin
        let mut input = String::new();
        match io::stdin().read_to_string(&mut input) {
            Ok(_) => run_script(&mut calculator, &input),
            Err(source) => Error::Io { path: "<stdin>".to_string(), source }.report_to_stderr(),
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };
        println!("type `:help` for a list of commands");

        fn process_line(rl: &mut DefaultEditor, calculator: &mut Calculator) -> Result<Flow, ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(Flow::Continue);
            }

            rl.add_history_entry(&input)?;

            match run_line(calculator, &input) {
                Ok(Flow::Quit) => return Ok(Flow::Quit),
                Ok(Flow::Continue) => (),
                Err(err) => err.report_to_stderr(),
            }
            println!("{}", calculator.render_markup());
            Ok(Flow::Continue)
        }

        loop {
            match process_line(&mut rl, &mut calculator) {
                Ok(Flow::Continue) => (),
                Ok(Flow::Quit) => break,
                Err(err) => {
                    match err {
                        ReadlineError::Eof | ReadlineError::Interrupted => (),
                        _ => eprintln!("{}", err),
                    }
                    break;
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_commands() {
        let mut calculator = Calculator::new();
        run_script(&mut calculator, ":frac\n1\n:right\n2\n");
        assert_eq!(calculator.to_evaluable_string(), "(1)/(2)");
    }

    #[test]
    fn function_command() {
        let mut calculator = Calculator::new();
        run_script(&mut calculator, ":fn sqrt\n16\n:calc");
        assert_eq!(calculator.result(), Some("4"));
    }

    #[test]
    fn errors() {
        let mut calculator = Calculator::new();
        assert!(matches!(run_line(&mut calculator, ":nope"), Err(Error::UnknownCommand(_))));
        assert!(matches!(run_line(&mut calculator, ":fn"), Err(Error::MissingArgument { .. })));
        assert!(matches!(run_line(&mut calculator, ":select 3"), Err(Error::BadNodeId(_))));
        assert!(matches!(run_line(&mut calculator, ":select n99"), Err(Error::Ignored(_))));
        assert!(matches!(run_line(&mut calculator, "1$"), Err(Error::UnboundKey('$'))));
        assert_eq!(calculator.to_evaluable_string(), "1");
    }

    #[test]
    fn system_of_equations() {
        let mut calculator = Calculator::new();
        run_script(&mut calculator, "x + y = 3;\nx - y = 1\n:calc");
        assert_eq!(calculator.result(), Some("x = 2, y = 1"));
    }

    #[test]
    fn calculating_nothing() {
        let mut calculator = Calculator::new();
        run_script(&mut calculator, ":calc");
        assert_eq!(calculator.result(), Some("Invalid expression"));
    }

    #[test]
    fn quit_stops_the_script() {
        let mut calculator = Calculator::new();
        run_script(&mut calculator, "1\n:quit\n2");
        assert_eq!(calculator.to_evaluable_string(), "1");
    }
}
