//! Report sinks for per-generation progress and the final route plan.

use std::io::Write;

use crate::error::Result;
use crate::models::RoutePlan;

/// Receives progress lines from the evolution driver.
pub trait ReportSink {
    /// Called once per generation (generation 0 is the initial population)
    /// with the elite's penalized distance and gene sequence.
    fn generation(&mut self, generation: usize, best_cost: f64, genes: &[usize]) -> Result<()>;

    /// Called once when the run terminates.
    fn finish(&mut self, generations: usize, genes: &[usize], plan: &RoutePlan) -> Result<()>;
}

fn write_genes<W: Write>(out: &mut W, genes: &[usize]) -> std::io::Result<()> {
    let mut first = true;
    for id in genes {
        if !first {
            write!(out, " ")?;
        }
        write!(out, "{id}")?;
        first = false;
    }
    Ok(())
}

/// Writes a plain-text report, one line per generation.
///
/// ```text
/// generation 12 | best 1234.567890 | 5 3 1 ...
/// ```
///
/// The final block lists each route as `ids | distance load`.
pub struct TextReportSink<W: Write> {
    out: W,
}

impl<W: Write> TextReportSink<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextReportSink<W> {
    fn generation(&mut self, generation: usize, best_cost: f64, genes: &[usize]) -> Result<()> {
        write!(self.out, "generation {generation} | best {best_cost:.6} | ")?;
        write_genes(&mut self.out, genes)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, generations: usize, genes: &[usize], plan: &RoutePlan) -> Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "result after {generations} generations | best {:.6}",
            plan.cost()
        )?;
        write_genes(&mut self.out, genes)?;
        writeln!(self.out)?;
        writeln!(self.out, "routes:")?;
        for route in &plan.routes {
            write_genes(&mut self.out, route.customers())?;
            write!(self.out, " | {:.6} {}", route.distance(), route.load())?;
            if route.is_overloaded() {
                write!(self.out, " overloaded")?;
            }
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// One recorded generation line.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_cost: f64,
    pub genes: Vec<usize>,
}

/// Keeps every report in memory; useful for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryReportSink {
    pub generations: Vec<GenerationRecord>,
    pub finished: Option<(usize, Vec<usize>, RoutePlan)>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemoryReportSink {
    fn generation(&mut self, generation: usize, best_cost: f64, genes: &[usize]) -> Result<()> {
        self.generations.push(GenerationRecord {
            generation,
            best_cost,
            genes: genes.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self, generations: usize, genes: &[usize], plan: &RoutePlan) -> Result<()> {
        self.finished = Some((generations, genes.to_vec(), plan.clone()));
        Ok(())
    }
}
