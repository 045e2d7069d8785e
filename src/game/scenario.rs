//! The mansion and its suspects
//!
//! Every edition walks the same eleven rooms. The Novice edition strips the
//! clues out; the Master edition also knows which suspect each clue
//! incriminates.

use super::Edition;
use crate::data::*;
use crate::Result;

/// Entrance of the mansion
pub const ENTRANCE: &str = "Hall de Entrada";

/// Which suspect each clue points to
pub const CLUE_SUSPECTS: [(&str, &str); 9] = [
    ("Mapa da mansão encontrado", "Mordomo"),
    ("Pegadas suspeitas no tapete", "Jardineiro"),
    ("Livro com páginas rasgadas", "Bibliotecária"),
    ("Faca com manchas estranhas", "Cozinheiro"),
    ("Carta misteriosa na gaveta", "Mordomo"),
    ("Documento confidencial", "Secretária"),
    ("Chave enterrada no solo", "Jardineiro"),
    ("Frasco de remédio vazio", "Enfermeira"),
    ("Joia valiosa escondida", "Cozinheiro"),
];

/// Build the mansion as laid out for `edition`
///
/// ```text
/// Hall de Entrada
/// ├── Sala de Estar
/// │   ├── Cozinha ── Despensa, Banheiro
/// │   └── Quarto Principal ── Closet, Varanda
/// └── Biblioteca ── Escritório, Jardim
/// ```
pub fn mansion(edition: Edition) -> Result<RoomTree> {
    let clue = |text: &'static str| edition.collects_clues().then_some(text);

    let cozinha = Room::create("Cozinha", clue("Faca com manchas estranhas"))?
        .with_left(Room::create("Despensa", None)?)
        .with_right(Room::create("Banheiro", clue("Frasco de remédio vazio"))?);

    let quarto = Room::create("Quarto Principal", clue("Carta misteriosa na gaveta"))?
        .with_left(Room::create("Closet", clue("Joia valiosa escondida"))?)
        .with_right(Room::create("Varanda", None)?);

    let sala = Room::create("Sala de Estar", clue("Pegadas suspeitas no tapete"))?
        .with_left(cozinha)
        .with_right(quarto);

    let biblioteca = Room::create("Biblioteca", clue("Livro com páginas rasgadas"))?
        .with_left(Room::create("Escritório", clue("Documento confidencial"))?)
        .with_right(Room::create("Jardim", clue("Chave enterrada no solo"))?);

    let hall = Room::create(ENTRANCE, clue("Mapa da mansão encontrado"))?
        .with_left(sala)
        .with_right(biblioteca);

    Ok(RoomTree::new(hall))
}

/// Directory seeded with [`CLUE_SUSPECTS`]
pub fn suspect_directory() -> Result<SuspectDirectory> {
    SuspectDirectory::from_associations(CLUE_SUSPECTS)
}
