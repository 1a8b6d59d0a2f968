use rustyline::{error::ReadlineError, Editor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error(transparent)]
    Readline(ReadlineError),
    #[error("Eval failed: {0:?}")]
    EvalError(E),
}

/// Whether the session keeps reading lines after an evaluation.
#[derive(Clone, Copy, Debug)]
pub enum Flow {
    Continue,
    Break,
}

pub trait Repl {
    type Error: std::fmt::Debug;
    const PROMPT: &'static str = ">> ";
    const HISTORY: Option<&'static str> = None;
    fn evaluate(&mut self, input: String) -> Result<Flow, Self::Error>;
}

/// Drives a rustyline editor over `repl` until the evaluator asks to
/// stop or the user hits Ctrl-C/Ctrl-D.
pub fn start_repl<R: Repl>(mut repl: R) -> Result<(), Error<R::Error>> {
    let mut editor = Editor::<()>::new();
    if let Some(history) = R::HISTORY {
        editor.load_history(history).ok();
    }
    loop {
        match editor.readline(R::PROMPT) {
            Ok(line) => {
                editor.add_history_entry(line.as_str());
                match repl.evaluate(line).map_err(Error::EvalError)? {
                    Flow::Continue => {}
                    Flow::Break => break Ok(()),
                }
                if let Some(history) = R::HISTORY {
                    editor.save_history(history).map_err(Error::Readline)?;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye!");
                break Ok(());
            }
            Err(e) => break Err(Error::Readline(e)),
        }
    }
}
