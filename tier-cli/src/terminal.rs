//! Line-oriented host for the onboarding wizard.
//!
//! Each step is printed with its progress header, content and a key-hint
//! line, then typed commands are mapped onto wizard operations until the
//! step changes. Commands for a disabled affordance are ignored without a
//! message, matching a greyed-out button.

use std::io::{BufRead, Write};

use anyhow::Result;
use tier_core::wizard::{
    Choice, DataEntryForm, Selector, Step, StepStatus, WizardController, WizardError, WizardExit,
    step_indicator,
};
use tier_core::{Currency, DataType, InputMethod, TierField, TierRepository, UploadedFile};
use tracing::debug;

use crate::status_line::{KeyHint, build_status_line, hints};

/// One typed line, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Empty,
    Choose(usize),
    Next,
    Back,
    Edit,
    Confirm,
    Cancel,
    Help,
    Set(TierField, String),
    Feature(String),
    Currency(String),
    Attach(String),
    Detach,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        if let Ok(n) = verb.parse::<usize>() {
            return Self::Choose(n);
        }

        match (verb.to_ascii_lowercase().as_str(), rest) {
            ("", _) => Self::Empty,
            ("n" | "next", "") => Self::Next,
            ("b" | "back", "") => Self::Back,
            ("e" | "edit", "") => Self::Edit,
            ("y" | "confirm", "") => Self::Confirm,
            ("q" | "quit" | "cancel", "") => Self::Cancel,
            ("?" | "h" | "help", "") => Self::Help,
            ("detach", "") => Self::Detach,
            ("set", rest) => {
                let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match TierField::parse(key) {
                    Some(field) => Self::Set(field, value.trim().to_string()),
                    None => Self::Unknown(line.to_string()),
                }
            }
            ("feature", rest) if !rest.is_empty() => Self::Feature(rest.to_string()),
            ("currency", rest) if !rest.is_empty() => Self::Currency(rest.to_string()),
            ("attach", rest) if !rest.is_empty() => Self::Attach(rest.to_string()),
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Drives a [`WizardController`] from `input`, printing to `output`.
pub struct TerminalHost<R, W> {
    input: R,
    output: W,
    print_payload: bool,
}

impl<R: BufRead, W: Write> TerminalHost<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self {
            input,
            output,
            print_payload: false,
        }
    }

    /// Also print the dispatched record as JSON after a successful confirm.
    pub fn print_payload(
        mut self,
        enabled: bool,
    ) -> Self {
        self.print_payload = enabled;
        self
    }

    /// Runs the wizard until it is confirmed or cancelled.
    ///
    /// End of input cancels, as closing the page would.
    pub async fn run(
        &mut self,
        wizard: &mut WizardController,
        repository: &dyn TierRepository,
    ) -> Result<WizardExit> {
        loop {
            let step = wizard.current_step();
            debug!(step = step.number(), "showing step");
            let exit = match step {
                Step::SelectDataType => self.choose::<DataType>(wizard)?,
                Step::ChooseInputMethod => self.choose::<InputMethod>(wizard)?,
                Step::DataEntry => self.enter_data(wizard)?,
                Step::ReviewConfirm => self.review(wizard, repository).await?,
            };
            if let Some(exit) = exit {
                return Ok(exit);
            }
        }
    }

    fn read_command(&mut self) -> Result<Option<Command>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(Command::parse(&line)))
    }

    fn leave(
        &mut self,
        wizard: &mut WizardController,
    ) -> Result<Option<WizardExit>> {
        Ok(Some(wizard.cancel()?))
    }

    fn not_here(
        &mut self,
        command: &Command,
    ) -> Result<()> {
        match command {
            Command::Unknown(text) => {
                writeln!(self.output, "Unknown command '{text}'. Type ? for help.")?
            }
            _ => writeln!(self.output, "Not available here. Type ? for help.")?,
        }
        Ok(())
    }

    fn render_header(
        &mut self,
        step: Step,
    ) -> Result<()> {
        writeln!(self.output)?;
        if let Some(entries) = step_indicator(step) {
            let line = entries
                .iter()
                .map(|(s, status)| {
                    let mark = match status {
                        StepStatus::Completed => "[x]",
                        StepStatus::Current => "[>]",
                        StepStatus::Upcoming => "[ ]",
                    };
                    format!("{mark} {s}")
                })
                .collect::<Vec<_>>()
                .join("   ");
            writeln!(self.output, "{line}")?;
            writeln!(self.output)?;
        }
        writeln!(self.output, "== {} ==", step.title())?;
        Ok(())
    }

    fn render_hints(
        &mut self,
        hints: &[KeyHint],
    ) -> Result<()> {
        writeln!(self.output, "{}", build_status_line(hints))?;
        Ok(())
    }

    fn choose<T: Choice>(
        &mut self,
        wizard: &mut WizardController,
    ) -> Result<Option<WizardExit>> {
        let mut selector = Selector::<T>::for_state(wizard.state());
        let mut redraw = true;
        loop {
            if redraw {
                self.render_choices(&selector)?;
            }
            redraw = true;

            let Some(command) = self.read_command()? else {
                return self.leave(wizard);
            };
            match command {
                Command::Choose(n) => match n.checked_sub(1).and_then(|i| selector.options().get(i)) {
                    Some(value) => selector.stage(*value),
                    None => {
                        writeln!(self.output, "No option {n}.")?;
                        redraw = false;
                    }
                },
                Command::Next if selector.can_commit() => {
                    selector.commit(wizard)?;
                    return Ok(None);
                }
                Command::Back if T::STEP != Step::FIRST => {
                    wizard.retreat();
                    return Ok(None);
                }
                Command::Next | Command::Back | Command::Empty => redraw = false,
                Command::Cancel => return self.leave(wizard),
                Command::Help => {
                    writeln!(
                        self.output,
                        "Type an option number to select it, then n to continue."
                    )?;
                    redraw = false;
                }
                other => {
                    self.not_here(&other)?;
                    redraw = false;
                }
            }
        }
    }

    fn render_choices<T: Choice>(
        &mut self,
        selector: &Selector<T>,
    ) -> Result<()> {
        self.render_header(T::STEP)?;
        for (i, option) in selector.options().iter().enumerate() {
            let mark = if selector.is_staged(*option) { "(*)" } else { "( )" };
            writeln!(self.output, "  {mark} {}. {}", i + 1, option.title())?;
            writeln!(self.output, "        {}", option.description())?;
        }
        self.render_hints(&[
            hints::SELECT,
            hints::NEXT.enabled_if(selector.can_commit()),
            hints::BACK.enabled_if(T::STEP != Step::FIRST),
            hints::CANCEL,
        ])
    }

    fn enter_data(
        &mut self,
        wizard: &mut WizardController,
    ) -> Result<Option<WizardExit>> {
        let Some(mut form) = DataEntryForm::for_state(wizard.state()) else {
            return Err(WizardError::MissingSelection(Step::ChooseInputMethod).into());
        };
        let manual = form.method() == InputMethod::Manual;
        let mut redraw = true;
        loop {
            if redraw {
                self.render_form(&form)?;
            }
            redraw = true;

            let Some(command) = self.read_command()? else {
                return self.leave(wizard);
            };
            match command {
                Command::Set(field, value) if manual => form.set(field, value),
                Command::Feature(text) if manual => {
                    let mut features = form.data().features.clone();
                    if !features.is_empty() {
                        features.push('\n');
                    }
                    features.push_str(&text);
                    form.set(TierField::Features, features);
                }
                Command::Currency(code) if manual => match Currency::parse(&code) {
                    Some(currency) => form.set_currency(currency),
                    None => {
                        let known: Vec<&str> = Currency::all().iter().map(|c| c.as_str()).collect();
                        writeln!(
                            self.output,
                            "Unknown currency '{code}'. Use one of {}.",
                            known.join(", ")
                        )?;
                        redraw = false;
                    }
                },
                Command::Attach(path) if !manual => {
                    let mut file = UploadedFile::new(&path);
                    if let Ok(meta) = std::fs::metadata(&path) {
                        file = file.with_size(meta.len());
                    }
                    form.attach(file);
                }
                Command::Detach if !manual => {
                    form.detach();
                }
                Command::Next if form.is_valid() => {
                    form.submit(wizard)?;
                    return Ok(None);
                }
                Command::Next | Command::Empty => redraw = false,
                Command::Back => {
                    wizard.retreat();
                    return Ok(None);
                }
                Command::Cancel => return self.leave(wizard),
                Command::Help => {
                    self.form_help(manual)?;
                    redraw = false;
                }
                other => {
                    self.not_here(&other)?;
                    redraw = false;
                }
            }
        }
    }

    fn form_help(
        &mut self,
        manual: bool,
    ) -> Result<()> {
        if manual {
            let keys: Vec<&str> = TierField::all().iter().map(|f| f.key()).collect();
            writeln!(self.output, "set <field> <value>   fields: {}", keys.join(", "))?;
            writeln!(self.output, "feature <text>        add one feature line")?;
            writeln!(self.output, "currency <code>       USD, EUR, GBP or JPY")?;
        } else {
            writeln!(self.output, "attach <path>         attach a CSV or JSON file")?;
            writeln!(self.output, "detach                remove the attached file")?;
        }
        Ok(())
    }

    fn render_form(
        &mut self,
        form: &DataEntryForm,
    ) -> Result<()> {
        self.render_header(Step::DataEntry)?;
        let data = form.data();
        match form.method() {
            InputMethod::Manual => {
                for field in TierField::all() {
                    let marker = if field.is_required() { " *" } else { "" };
                    let label = format!("{}{marker}", field.label());
                    let value = match field {
                        TierField::Features => data.feature_list().join("; "),
                        _ => data.field(*field).to_string(),
                    };
                    writeln!(self.output, "  {:<11} {label:<24} {value}", field.key())?;
                }
                writeln!(self.output, "  {:<11} {:<24} {}", "currency", "Currency", data.currency)?;
            }
            InputMethod::Upload => {
                writeln!(self.output, "  Upload a CSV or JSON file.")?;
                match form.attachment() {
                    Some(file) => writeln!(self.output, "  File: {file}")?,
                    None => writeln!(self.output, "  File: (none)")?,
                }
            }
        }
        self.render_hints(&[
            hints::FINISH.enabled_if(form.is_valid()),
            hints::BACK,
            hints::HELP,
            hints::CANCEL,
        ])
    }

    async fn review(
        &mut self,
        wizard: &mut WizardController,
        repository: &dyn TierRepository,
    ) -> Result<Option<WizardExit>> {
        let mut redraw = true;
        loop {
            if redraw {
                self.render_header(Step::ReviewConfirm)?;
                if let Some(summary) = wizard.review() {
                    writeln!(self.output, "{summary}")?;
                }
                self.render_hints(&[
                    KeyHint::new("y", "Confirm & Continue"),
                    KeyHint::new("e", "Edit"),
                    hints::CANCEL,
                ])?;
            }
            redraw = true;

            let Some(command) = self.read_command()? else {
                return self.leave(wizard);
            };
            match command {
                Command::Confirm => {
                    let payload = wizard.payload()?;
                    match wizard.confirm(repository).await {
                        Ok(exit) => {
                            if self.print_payload {
                                writeln!(self.output, "{}", serde_json::to_string_pretty(&payload)?)?;
                            }
                            return Ok(Some(exit));
                        }
                        Err(WizardError::Submission(error)) => {
                            writeln!(self.output, "Could not save the tier: {error}")?;
                        }
                        Err(error) => return Err(error.into()),
                    }
                }
                // Review only leaves towards data entry through an edit.
                Command::Edit => {
                    wizard.edit_requested()?;
                    return Ok(None);
                }
                Command::Cancel => return self.leave(wizard),
                Command::Empty => redraw = false,
                Command::Help => {
                    writeln!(self.output, "y saves the tier, e goes back to data entry.")?;
                    redraw = false;
                }
                other => {
                    self.not_here(&other)?;
                    redraw = false;
                }
            }
        }
    }
}
