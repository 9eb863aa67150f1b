use crate::domain::model::PostalArea;
use crate::domain::ports::AreaSelector;
use crate::utils::error::{GeoChronError, Result};
use std::io::{BufRead, Write};
use std::sync::Mutex;

/// Picks a pre-chosen 1-based position, e.g. from `--area`.
#[derive(Debug, Clone, Copy)]
pub struct IndexSelector {
    position: usize,
}

impl IndexSelector {
    pub fn new(position: usize) -> Self {
        Self { position }
    }
}

impl AreaSelector for IndexSelector {
    fn select(&self, areas: &[PostalArea]) -> Result<PostalArea> {
        pick(areas, self.position)
    }
}

/// Lists the areas and reads a number from a line-oriented reader (stdin by default).
pub struct PromptSelector<R, W> {
    io: Mutex<(R, W)>,
}

pub type StdinSelector = PromptSelector<std::io::StdinLock<'static>, std::io::Stdout>;

impl StdinSelector {
    pub fn stdin() -> Self {
        PromptSelector::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }
}

impl<R: BufRead, W: Write> AreaSelector for PromptSelector<R, W> {
    fn select(&self, areas: &[PostalArea]) -> Result<PostalArea> {
        if let [only] = areas {
            tracing::info!("Only one postal area, selecting {}", only.label());
            return Ok(only.clone());
        }

        let mut io = self
            .io
            .lock()
            .map_err(|_| GeoChronError::validation("area prompt is unavailable"))?;
        let (reader, writer) = &mut *io;

        writeln!(
            writer,
            "Found {} postal area(s). Please select one:",
            areas.len()
        )?;
        for (i, area) in areas.iter().enumerate() {
            writeln!(writer, "  {:>2}. {}", i + 1, area.label())?;
        }
        write!(writer, "Area [1-{}]: ", areas.len())?;
        writer.flush()?;

        let mut line = String::new();
        reader.read_line(&mut line)?;
        let position: usize = line.trim().parse().map_err(|_| {
            GeoChronError::validation("Please select an area from the list")
        })?;
        pick(areas, position)
    }
}

fn pick(areas: &[PostalArea], position: usize) -> Result<PostalArea> {
    position
        .checked_sub(1)
        .and_then(|i| areas.get(i))
        .cloned()
        .ok_or_else(|| {
            GeoChronError::validation(format!(
                "Area {} is not in the list (1-{})",
                position,
                areas.len()
            ))
        })
}
