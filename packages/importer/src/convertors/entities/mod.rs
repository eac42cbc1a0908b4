//! Entity converters of the exchange format.

mod adresni_misto;
mod obec;
mod parcela;
mod stat;
mod ulice;
mod zpusob_ochrany;

pub use adresni_misto::{AdresniMisto, AdresniMistoEntity};
pub use obec::{Obec, ObecEntity};
pub use parcela::{Parcela, ParcelaEntity};
pub use stat::{Stat, StatEntity};
pub use ulice::{Ulice, UliceEntity};
pub use zpusob_ochrany::{ZpusobOchranyPozemku, ZpusobOchranyPozemkuEntity, SQL_DELETE_BY_PARCELA};
