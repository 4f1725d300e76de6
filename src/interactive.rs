//! Prompt-driven exploration session: choose filters, read the report, page
//! through raw trips, restart.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use tracing::{debug, error};

use crate::city::City;
use crate::dataset::{Dataset, PAGE_SIZE};
use crate::filter::{DayFilter, Filter, MonthFilter};
use crate::loader::Loader;
use crate::output::{write_report, write_trip};
use crate::stats::TripReport;

const CITY_PROMPT: &str =
    "Please choose which city you want to explore [Chicago, New York City, Washington]: ";
const MONTH_PROMPT: &str =
    "Please choose which month you want [Jan, Feb, Mar, Apr, May, June] or \"all\": ";
const DAY_PROMPT: &str =
    "Please choose which day you want [Mon, Tu, Wed, Th, Fri, Sat, Sun] or \"all\": ";

pub struct Session<R, W> {
    loader: Loader,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(loader: Loader, input: R, output: W) -> Self {
        Self {
            loader,
            input,
            output,
        }
    }

    /// Runs sessions until the user declines a restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some((city, filter)) = self.prompt_filters()? else {
                break;
            };

            match self.loader.load(city, filter) {
                Ok(dataset) => {
                    let report = TripReport::from_dataset(&dataset);
                    write_report(&mut self.output, &report)?;
                    self.view_raw(&dataset)?;
                }
                Err(e) => {
                    error!(city = city.id(), error = %e, "Failed to load trip data");
                    writeln!(self.output, "\nCould not load data: {e}")?;
                }
            }

            if !self.confirm("\nWould you like to restart? [Yes/Y, No/N]: ")? {
                break;
            }
        }
        Ok(())
    }

    /// Asks for city, month and day. `None` if input ends first.
    fn prompt_filters(&mut self) -> Result<Option<(City, Filter)>> {
        writeln!(self.output, "----------------------------------------")?;
        writeln!(self.output, "\nHello! Let's explore some US bikeshare data!\n")?;

        let Some(city) = self.prompt_until::<City>(CITY_PROMPT)? else {
            return Ok(None);
        };
        let Some(month) = self.prompt_until::<MonthFilter>(MONTH_PROMPT)? else {
            return Ok(None);
        };
        let Some(day) = self.prompt_until::<DayFilter>(DAY_PROMPT)? else {
            return Ok(None);
        };

        debug!(city = city.id(), %month, %day, "Filters chosen");
        Ok(Some((city, Filter::new(month, day))))
    }

    /// Pages through the dataset five records at a time while the user says yes.
    fn view_raw(&mut self, dataset: &Dataset) -> Result<()> {
        let mut question = "\nWould you like to see individual trip data? [Yes/Y, No/N]: ";
        let mut start = 0;

        while start < dataset.len() {
            if !self.confirm(question)? {
                break;
            }
            writeln!(self.output, "----------------------------------------")?;
            for (offset, trip) in dataset.page(start).iter().enumerate() {
                write_trip(&mut self.output, start + offset, trip)?;
            }
            start += PAGE_SIZE;
            question = "Would you like to continue? [Yes/Y, No/N]: ";
        }
        Ok(())
    }

    fn prompt_until<T: FromStr>(&mut self, question: &str) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "\nPlease enter a proper input")?,
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?.unwrap_or_default().to_lowercase();
        Ok(answer == "yes" || answer == "y")
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
