use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;
use tracing::debug;

use crate::instance::Instance;

impl Instance {
    /// Writes the instance in the textual format accepted by [`Instance::read`]:
    /// a header `sites types edges`, the type distribution, the cost matrix and one edge
    /// per line, with the sections separated by blank lines.
    pub fn write(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "{} {} {}",
            self.num_sites(),
            self.num_types(),
            self.num_edges()
        )?;
        writeln!(writer)?;

        writeln!(writer, "{}", self.type_distribution().iter().join(" "))?;
        writeln!(writer)?;

        for row in self.costs().rows() {
            writeln!(writer, "{}", row.iter().join(" "))?;
        }
        writeln!(writer)?;

        for (u, v) in self.edges() {
            writeln!(writer, "{u} {v}")?;
        }

        Ok(())
    }

    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        debug!("Write instance to {path:?}");
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()
    }
}
