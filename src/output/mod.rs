use crate::plex::{Library, WatchedSet};
use std::io::{self, Write};

/// Display the server's library sections
pub fn display_libraries(libraries: &[Library], writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Plex Libraries:")?;
    writeln!(writer, "---------------")?;

    if libraries.is_empty() {
        writeln!(writer, "No libraries found.")?;
        return Ok(());
    }

    for library in libraries {
        writeln!(writer, "{}) {}", library.id, library.title)?;
    }

    Ok(())
}

/// Display watched episodes of one library, ordered by media id
pub fn display_watched(
    library_id: &str,
    watched: &WatchedSet,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Watched in Library: {}", library_id)?;
    writeln!(writer, "-------------------")?;

    if watched.is_empty() {
        writeln!(writer, "No watched episodes.")?;
        return Ok(());
    }

    for episode in watched.values() {
        write!(
            writer,
            "- {}: S{},E{}",
            episode.show, episode.season, episode.episode
        )?;
        if let Some(viewed_at) = episode.viewed_at {
            write!(writer, " (watched {})", viewed_at.format("%Y-%m-%d"))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
