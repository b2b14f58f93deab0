//! Menu-driven interactive mode.
//!
//! A [`Session`] reads choices line by line from any [`BufRead`] and writes
//! to any [`Write`], so whole sessions can be replayed from a string.
//! Failed actions print an error and return to the main menu; end of input
//! ends the session.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use statkit_data::{DatasetStore, SampleSource};
use statkit_stats::{
    Alternative, Sample,
    hypothesis::DEFAULT_ALPHA,
    sample::{format_values, parse_value},
};

use crate::command::{
    data,
    demo::{self, DEMO_MU0},
    describe::{self, Sections},
    ttest,
};

const RULE_WIDTH: usize = 60;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("end of input")]
struct EndOfInput;

#[derive(Debug, Clone)]
struct CurrentData {
    sample: Sample,
    source: String,
}

/// State of one interactive run.
pub(crate) struct Session<R, W> {
    input: R,
    output: W,
    store: DatasetStore,
    current: Option<CurrentData>,
    show_steps: bool,
}

impl<R, W> Session<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W, store: DatasetStore, show_steps: bool) -> Self {
        Self {
            input,
            output,
            store,
            current: None,
            show_steps,
        }
    }

    /// Shows the main menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub(crate) fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.write_main_menu()?;
            let outcome = match self.prompt("Enter your choice (0-5): ") {
                Ok(choice) => match choice.as_str() {
                    "0" => {
                        writeln!(self.output, "Thank you for using the Statistics Toolkit!")?;
                        break;
                    }
                    "1" => self.descriptive_menu(),
                    "2" => self.hypothesis_menu(),
                    "3" => self.data_menu(),
                    "4" => self.demo(),
                    "5" => self.help(),
                    _ => {
                        writeln!(
                            self.output,
                            "Invalid choice. Please enter a number from 0-5."
                        )?;
                        Ok(())
                    }
                },
                Err(err) => Err(err),
            };

            let Err(err) = outcome else {
                continue;
            };
            if err.is::<EndOfInput>() {
                writeln!(self.output, "\nExiting...")?;
                break;
            }
            if err.is::<io::Error>() {
                return Err(err);
            }
            log::debug!("menu action failed: {err:?}");
            writeln!(self.output, "Error: {err:#}")?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn write_main_menu(&mut self) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "        STATISTICS TOOLKIT - MAIN MENU")?;
        writeln!(self.output, "{rule}")?;
        if let Some(current) = &self.current {
            writeln!(
                self.output,
                "Current data: {} values ({})",
                current.sample.len(),
                current.source
            )?;
        }
        for line in [
            "1.  Descriptive Statistics",
            "2.  Hypothesis Testing",
            "3.  Data Management",
            "4.  Sample Data Demo",
            "5.  Help",
            "0.  Exit",
        ] {
            writeln!(self.output, "{line}")?;
        }
        writeln!(self.output, "{rule}")
    }

    fn descriptive_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n=== DESCRIPTIVE STATISTICS ===")?;
        let sample = self.collect_sample()?;
        writeln!(self.output, "\nChoose analysis:")?;
        writeln!(self.output, "1. Measures of Center")?;
        writeln!(self.output, "2. Measures of Spread")?;
        writeln!(self.output, "3. Five-Number Summary")?;
        writeln!(self.output, "4. All Statistics")?;
        let sections = match self.prompt("Enter choice (1-4): ")?.as_str() {
            "1" => Sections::CENTER,
            "2" => Sections::SPREAD,
            "3" => Sections::SUMMARY,
            "4" => Sections::ALL,
            choice => anyhow::bail!("invalid analysis choice '{choice}'"),
        };
        describe::write_descriptive(&mut self.output, &sample, sections, self.show_steps)
    }

    fn hypothesis_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n=== HYPOTHESIS TESTING ===")?;
        writeln!(self.output, "1. One-Sample t-test")?;
        let choice = self.prompt("Enter choice (1): ")?;
        if choice != "1" {
            anyhow::bail!("invalid test choice '{choice}'");
        }

        let sample = self.collect_sample()?;
        let mu0 = parse_value(&self.prompt("Enter hypothesized mean (μ₀): ")?)
            .context("invalid hypothesized mean")?;
        let alpha = match self.prompt(&format!(
            "Enter significance level (default {DEFAULT_ALPHA}): "
        ))? {
            text if text.is_empty() => DEFAULT_ALPHA,
            text => parse_value(&text).context("invalid significance level")?,
        };
        let alternative = match self
            .prompt("Alternative hypothesis (1=two-sided, 2=greater, 3=less): ")?
            .as_str()
        {
            "" | "1" => Alternative::TwoSided,
            "2" => Alternative::Greater,
            "3" => Alternative::Less,
            other => other.parse()?,
        };
        ttest::write_t_test(
            &mut self.output,
            &sample,
            mu0,
            alpha,
            alternative,
            self.show_steps,
        )
    }

    fn data_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n=== DATA MANAGEMENT ===")?;
        writeln!(self.output, "1. List saved data")?;
        writeln!(self.output, "2. Save current data")?;
        writeln!(self.output, "3. Load saved data")?;
        match self.prompt("Enter choice (1-3): ")?.as_str() {
            "1" => data::write_list(&mut self.output, &self.store)?,
            "2" => {
                let Some(current) = self.current.clone() else {
                    anyhow::bail!("no current data to save; analyze or load a sample first");
                };
                let name = self.prompt("Enter a name for the dataset: ")?;
                let path = self
                    .store
                    .save(&name, &current.sample, Some(&current.source))?;
                writeln!(self.output, "Data saved as '{name}' in {}", path.display())?;
            }
            "3" => {
                self.write_saved_names()?;
                let name = self.prompt("Enter dataset name: ")?;
                self.load_current(SampleSource::Dataset(name))?;
            }
            choice => anyhow::bail!("invalid data management choice '{choice}'"),
        }
        Ok(())
    }

    fn demo(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n=== SAMPLE DATA DEMONSTRATION ===")?;
        let sample = demo::demo_sample()?;
        demo::write_demo(&mut self.output, &sample, self.show_steps)?;
        writeln!(
            self.output,
            "\nThe demo scores are now the current data (tested against μ₀ = {DEMO_MU0})."
        )?;
        self.current = Some(CurrentData {
            sample,
            source: "demo".to_owned(),
        });
        Ok(())
    }

    fn help(&mut self) -> anyhow::Result<()> {
        let text = "\
=== STATISTICS TOOLKIT HELP ===
This toolkit provides step-by-step statistical analysis.

Features:
- Descriptive Statistics: mean, median, mode, variance, quartiles, outliers
- Hypothesis Testing: one-sample t-test with every step explained
- Data Management: save and load named datasets
- Sample Data Demo: all analyses on built-in test scores

Data input:
- Manual entry: numbers separated by spaces or commas
- CSV files: one numeric column of a file with a header line
- Saved data: datasets saved from an earlier analysis
";
        writeln!(self.output, "\n{text}")?;
        writeln!(self.output, "Datasets are stored in {}", self.store.dir().display())?;
        Ok(())
    }

    /// Asks where the sample comes from, loads it and makes it current.
    fn collect_sample(&mut self) -> anyhow::Result<Sample> {
        writeln!(self.output, "\nData input:")?;
        writeln!(self.output, "1. Enter data manually")?;
        writeln!(self.output, "2. Load from CSV file")?;
        writeln!(self.output, "3. Use saved dataset")?;
        if self.current.is_some() {
            writeln!(self.output, "4. Use current data")?;
        }
        let source = match self.prompt("Enter choice: ")?.as_str() {
            "1" => SampleSource::Literal(
                self.prompt("Enter numbers separated by spaces or commas: ")?,
            ),
            "2" => {
                let path = PathBuf::from(self.prompt("Enter CSV file path: ")?);
                let column = self.prompt("Column name (blank for first numeric column): ")?;
                SampleSource::Csv {
                    path,
                    column: (!column.is_empty()).then_some(column),
                }
            }
            "3" => {
                self.write_saved_names()?;
                SampleSource::Dataset(self.prompt("Enter dataset name: ")?)
            }
            "4" => match &self.current {
                Some(current) => return Ok(current.sample.clone()),
                None => anyhow::bail!("no current data"),
            },
            choice => anyhow::bail!("invalid data input choice '{choice}'"),
        };
        self.load_current(source)
    }

    fn load_current(&mut self, source: SampleSource) -> anyhow::Result<Sample> {
        let sample = source
            .load(&self.store)
            .with_context(|| format!("failed to read sample from {source}"))?;
        writeln!(
            self.output,
            "Loaded {} values: {}",
            sample.len(),
            format_values(sample.values())
        )?;
        log::info!("current data set from {source}");
        self.current = Some(CurrentData {
            sample: sample.clone(),
            source: source.to_string(),
        });
        Ok(sample)
    }

    fn write_saved_names(&mut self) -> anyhow::Result<()> {
        let names = self.store.list()?;
        if names.is_empty() {
            writeln!(self.output, "No saved data found.")?;
        } else {
            writeln!(self.output, "Saved datasets: {}", names.join(", "))?;
        }
        Ok(())
    }

    /// Prints `message` and reads one trimmed line.
    fn prompt(&mut self, message: &str) -> anyhow::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(EndOfInput.into()),
            Ok(_) => Ok(line.trim().to_owned()),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                anyhow::bail!("input line is not valid UTF-8")
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use super::*;

    fn run_session(store: &DatasetStore, input: &str) -> String {
        let mut output = vec![];
        Session::new(Cursor::new(input), &mut output, store.clone(), true)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, DatasetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::open(dir.path().join("datasets")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_measures_of_center_from_manual_entry() {
        let (_dir, store) = temp_store();
        let output = run_session(&store, "1\n1\n1 2 3 4\n1\n0\n");
        assert!(output.contains("Loaded 4 values: [1, 2, 3, 4]"));
        assert!(output.contains("x̄ = Σx/n = 10/4 = 2.5000"));
        assert!(output.contains("n is even: median = (2 + 3)/2 = 2.5000"));
        assert!(output.ends_with("Thank you for using the Statistics Toolkit!\n"));
    }

    #[test]
    fn test_t_test_with_default_alpha() {
        let (_dir, store) = temp_store();
        let output = run_session(
            &store,
            "2\n1\n1\n85 92 78 88 95 82 79 91 87 84\n85\n\n1\n0\n",
        );
        assert!(output.contains("t = 0.6226 (df = 9)"));
        assert!(output.contains("STEP 4: DECISION"));
    }

    #[test]
    fn test_error_returns_to_menu() {
        let (_dir, store) = temp_store();
        let output = run_session(&store, "1\n1\n1 x 3\n0\n");
        assert!(output.contains("Error: failed to read sample from manual"));
        assert!(!output.contains("MEASURES OF CENTER"));
        assert_eq!(output.matches("STATISTICS TOOLKIT - MAIN MENU").count(), 2);
    }

    #[test]
    fn test_invalid_main_menu_choice() {
        let (_dir, store) = temp_store();
        let output = run_session(&store, "9\n0\n");
        assert!(output.contains("Invalid choice. Please enter a number from 0-5."));
    }

    #[test]
    fn test_non_utf8_line_returns_to_menu() {
        let (_dir, store) = temp_store();
        let input: &[u8] = b"1\n\xff\xfe\n0\n";
        let mut output = vec![];
        Session::new(Cursor::new(input), &mut output, store, true)
            .run()
            .unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Error: input line is not valid UTF-8"));
        assert!(output.ends_with("Thank you for using the Statistics Toolkit!\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_dir, store) = temp_store();
        let output = run_session(&store, "1\n1\n");
        assert!(output.ends_with("\nExiting...\n"));
    }

    #[test]
    fn test_save_current_then_reuse_it() {
        let (_dir, store) = temp_store();
        let output = run_session(&store, "1\n1\n4 8 15 16 23 42\n2\n3\n2\nlost\n0\n");
        assert!(output.contains("Data saved as 'lost'"));
        assert_eq!(store.load("lost").unwrap().values(), &[4.0, 8.0, 15.0, 16.0, 23.0, 42.0]);
        assert_eq!(
            store.load_record("lost").unwrap().source.as_deref(),
            Some("manual")
        );

        let output = run_session(&store, "3\n3\nlost\n1\n4\n3\n0\n");
        assert!(output.contains("Saved datasets: lost"));
        assert!(output.contains("Current data: 6 values (dataset:lost)"));
        assert!(output.contains("=== FIVE-NUMBER SUMMARY ==="));
    }

    #[test]
    fn test_save_without_current_data() {
        let (_dir, store) = temp_store();
        let output = run_session(&store, "3\n2\n0\n");
        assert!(output.contains("Error: no current data to save"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_csv_input() {
        let (dir, store) = temp_store();
        let path = dir.path().join("scores.csv");
        fs::write(&path, "student,math\nann,85\nbob,92\ncid,78\n").unwrap();
        let input = format!("1\n2\n{}\nmath\n2\n0\n", path.display());
        let output = run_session(&store, &input);
        assert!(output.contains("Loaded 3 values: [85, 92, 78]"));
        assert!(output.contains("=== MEASURES OF SPREAD ==="));
    }

    #[test]
    fn test_demo_sets_current_data() {
        let (_dir, store) = temp_store();
        let output = run_session(&store, "4\n0\n");
        assert!(output.contains("=== ONE-SAMPLE T-TEST ==="));
        assert!(output.contains("Current data: 10 values (demo)"));
    }
}
