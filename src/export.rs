use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::model::Film;

/// Spreadsheet tools (notably Excel) only detect UTF-8 with a BOM.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const FILMES_CSV: &str = "filmes.csv";
pub const COMENTARIOS_CSV: &str = "comentarios.csv";

/// Where the two tables ended up.
pub struct ExportPaths {
    pub filmes_csv: PathBuf,
    pub comentarios_csv: PathBuf,
}

/// Flatten the film graph into the two related tables and write them
/// under `base_dir`, overwriting any previous run. The synthetic film id
/// joins the tables; the display name rides along for readability.
pub fn write_tables(films: &[Film], base_dir: &Path) -> Result<ExportPaths> {
    fs::create_dir_all(base_dir)
        .with_context(|| format!("creating output dir {}", base_dir.display()))?;

    let filmes_csv = base_dir.join(FILMES_CSV);
    let comentarios_csv = base_dir.join(COMENTARIOS_CSV);

    write_films(films, &filmes_csv)?;
    write_reviews(films, &comentarios_csv)?;

    info!(
        "wrote {} films and {} reviews to {}",
        films.len(),
        films.iter().map(|f| f.reviews.len()).sum::<usize>(),
        base_dir.display()
    );

    Ok(ExportPaths {
        filmes_csv,
        comentarios_csv,
    })
}

fn bom_writer(path: &Path) -> Result<csv::Writer<File>> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(UTF8_BOM)?;
    Ok(csv::Writer::from_writer(file))
}

fn write_films(films: &[Film], path: &Path) -> Result<()> {
    let mut writer = bom_writer(path)?;
    writer.write_record(["id", "nome", "nota", "resumo"])?;
    for film in films {
        writer.write_record([
            film.id.to_string(),
            film.name.clone(),
            film.rating.to_string(),
            film.summary.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_reviews(films: &[Film], path: &Path) -> Result<()> {
    let mut writer = bom_writer(path)?;
    writer.write_record([
        "filme_id",
        "nome_filme",
        "autor_comentario",
        "nota_comentario",
        "conteudo_comentario",
    ])?;
    for film in films {
        for review in &film.reviews {
            writer.write_record([
                film.id.to_string(),
                film.name.clone(),
                review.author.clone(),
                review.rating.to_string(),
                review.content.clone(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
