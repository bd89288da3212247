//! Interactive prompt loop.
//!
//! Each line runs against one persistent [`Runtime`], so definitions
//! accumulate across inputs. A single-statement result prints as its sole
//! element; longer programs print the whole list of statement values.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use tython_interp::value::ValueKind;
use tython_interp::Runtime;

pub fn run_repl() -> Result<(), String> {
    let mut editor = DefaultEditor::new().map_err(|e| e.to_string())?;
    let runtime = Runtime::new();

    loop {
        match editor.readline("tython > ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                match runtime.run(&line) {
                    Ok(value) => match &value.kind {
                        ValueKind::List(values) if values.len() == 1 => {
                            println!("{}", values[0]);
                        }
                        _ => println!("{value}"),
                    },
                    Err(err) => println!("{}", err.render("<stdin>", &line)),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(())
}
