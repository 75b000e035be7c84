// src/app.rs
//
// Calculatrice à touches : module App (autour du noyau)
// -----------------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + historique.rs)
// - Ré-exporter Session / Touche / JournalHistorique (pour main.rs)
//
// Important:
// - Aucune règle de construction ici : tout passe par crate::noyau.
// - L’affichage reste dans main.rs (console).

pub mod etat;
pub mod historique;

// Ré-export pratique : `use crate::app::Session;`
pub use etat::{ErreurSession, Session, Touche};
pub use historique::JournalHistorique;
