//! The interactive read-print loop.
//!
//! Drives a [`GuessingEngine`] over any line-based input and output, so the
//! same loop serves stdin/stdout and in-memory test transcripts.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use rand::Rng;

use ak_core::{GuessingEngine, Resolution};

const RULE_WIDTH: usize = 50;

/// Why a session stopped before the player declined another round.
enum Halt {
    /// Input ran out.
    Eof,
    /// The terminal failed.
    Io(io::Error),
}

impl From<io::Error> for Halt {
    fn from(e: io::Error) -> Self {
        Halt::Io(e)
    }
}

type Step<T> = Result<T, Halt>;

struct Console<I, O> {
    input: I,
    output: O,
    line: String,
}

impl<I: BufRead, O: Write> Console<I, O> {
    fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    fn say(&mut self, text: impl Display) -> Step<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line.
    fn ask(&mut self, prompt: &str) -> Step<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(Halt::Eof);
        }
        Ok(self.line.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> Step<bool> {
        Ok(self.ask(prompt)?.eq_ignore_ascii_case("yes"))
    }
}

/// Play rounds until the player declines another one or input ends.
pub fn run<R, I, O>(engine: &mut GuessingEngine<R>, input: I, output: O) -> Result<(), String>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut console = Console::new(input, output);

    match play(engine, &mut console) {
        Ok(()) => {}
        Err(Halt::Eof) => console.say("").map_err(describe)?,
        Err(Halt::Io(e)) => return Err(e.to_string()),
    }

    console
        .say("Thanks for playing Terminal Akinator!")
        .map_err(describe)
}

fn describe(halt: Halt) -> String {
    match halt {
        Halt::Eof => "input closed".to_string(),
        Halt::Io(e) => e.to_string(),
    }
}

fn play<R: Rng, I: BufRead, O: Write>(
    engine: &mut GuessingEngine<R>,
    console: &mut Console<I, O>,
) -> Step<()> {
    loop {
        play_round(engine, console)?;
        engine.finish();

        if !console.confirm("\nWant to play again? (yes/no): ")? {
            return Ok(());
        }
    }
}

fn play_round<R: Rng, I: BufRead, O: Write>(
    engine: &mut GuessingEngine<R>,
    console: &mut Console<I, O>,
) -> Step<()> {
    banner(console)?;
    engine.reset();

    while engine.candidates().len() > 1 {
        let Some(attribute) = engine.select_next_attribute() else {
            break;
        };

        console.say(format!("\n{}", engine.format_question(&attribute)))?;
        let answer = console.ask("Your answer: ")?;
        let (before, after) = engine.filter(&attribute, &answer);
        console.say(format!(
            "Narrowed down from {before} to {after} possibilities"
        ))?;
    }

    match engine.resolve() {
        Resolution::Exact(name) => {
            console.say(format!("\nIs your character {name}?"))?;
            if console.confirm("Am I right? (yes/no): ")? {
                console.say("Great! I guessed it!".green().bold())?;
            } else {
                learn(engine, console)?;
            }
        }
        Resolution::Unknown => {
            console.say("\nI couldn't find any matching characters!")?;
            learn(engine, console)?;
        }
        Resolution::BestEffort {
            guess,
            shortlist,
            remaining,
        } => {
            console.say(format!("\nI have {remaining} possibilities left:"))?;
            for name in &shortlist {
                console.say(format!("- {name}"))?;
            }
            console.say(format!("\nMy best guess is: {guess}"))?;
            if console.confirm("Am I right? (yes/no): ")? {
                console.say("Lucky guess!".green())?;
            } else {
                console.say("Let me learn about your character...")?;
                learn(engine, console)?;
            }
        }
    }

    Ok(())
}

fn learn<R: Rng, I: BufRead, O: Write>(
    engine: &mut GuessingEngine<R>,
    console: &mut Console<I, O>,
) -> Step<()> {
    console.say("\nI don't know this character! Help me learn.")?;
    let name = console.ask("What is your character's name? ")?;

    let learned =
        engine.learn_character(&name, |_, question| console.ask(&format!("{question} ")))?;

    console.say(format!(
        "Thanks! I've learned about {}.",
        learned.character.name()
    ))?;
    if !learned.saved {
        let notice = format!(
            "I couldn't save to {}, so I'll forget them when you quit.",
            engine.store().path().display()
        );
        console.say(notice.yellow())?;
    }
    Ok(())
}

fn banner<I: BufRead, O: Write>(console: &mut Console<I, O>) -> Step<()> {
    let rule = "=".repeat(RULE_WIDTH);
    console.say(format!("\n{rule}"))?;
    console.say("Welcome to Terminal Akinator!".bold())?;
    console.say(
        "Think of a fictional comic character and I'll try to guess it!",
    )?;
    console.say(
        "Answer with the exact format requested (e.g., 'yes'/'no', 'male'/'female')",
    )?;
    console.say(rule)
}
