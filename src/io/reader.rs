//! Instance sources.
//!
//! The text format is whitespace-delimited:
//!
//! ```text
//! N  best_known  capacity
//! depot_x depot_y
//! index x y demand      (N lines)
//! ```
//!
//! Line breaks carry no meaning; the customer index column is ignored and
//! customers are numbered 1..=N in file order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use tracing::instrument;

use crate::error::{CvrpError, Result};
use crate::models::{Customer, Point, ProblemInstance};

/// Anything that can produce a validated [`ProblemInstance`].
pub trait InstanceSource {
    /// Reads and validates the instance.
    fn read_instance(self) -> Result<ProblemInstance>;
}

/// Reads the whitespace-delimited text format from any reader.
///
/// # Examples
///
/// ```
/// use cvrp_ga::io::{InstanceSource, TextInstanceReader};
///
/// let text = "2 10.5 6\n0 0\n1 0 1 3\n2 0 2 4\n";
/// let instance = TextInstanceReader::new(text.as_bytes()).read_instance().unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.capacity(), 6.0);
/// assert_eq!(instance.best_known(), Some(10.5));
/// ```
pub struct TextInstanceReader<R: Read> {
    reader: R,
}

impl<R: Read> TextInstanceReader<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl TextInstanceReader<BufReader<File>> {
    /// Opens an instance file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> InstanceSource for TextInstanceReader<R> {
    #[instrument(level = "debug", skip_all)]
    fn read_instance(mut self) -> Result<ProblemInstance> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        parse_instance(&text)
    }
}

struct Tokens<'a>(SplitWhitespace<'a>);

impl Tokens<'_> {
    fn next<T: FromStr>(&mut self, field: &'static str) -> Result<T> {
        let token = self.0.next().ok_or(CvrpError::UnexpectedEnd { field })?;
        token.parse().map_err(|_| CvrpError::Parse {
            field,
            token: token.to_string(),
        })
    }
}

/// Parses the text format into a validated instance.
pub fn parse_instance(text: &str) -> Result<ProblemInstance> {
    let mut tokens = Tokens(text.split_whitespace());

    let count: usize = tokens.next("customer count")?;
    let best_known: f64 = tokens.next("reference value")?;
    let capacity: f64 = tokens.next("capacity")?;
    let depot = Point::new(tokens.next("depot x")?, tokens.next("depot y")?);

    // count is untrusted; the loop stops at the first missing token
    let mut customers = Vec::new();
    for id in 1..=count {
        let _index: f64 = tokens.next("customer index")?;
        let x = tokens.next("customer x")?;
        let y = tokens.next("customer y")?;
        let demand = tokens.next("customer demand")?;
        customers.push(Customer::new(id, x, y, demand));
    }

    Ok(ProblemInstance::new(depot, capacity, customers)?.with_best_known(best_known))
}
