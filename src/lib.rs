//! Calculatrice à touches
//!
//! - noyau : moteur de requêtes (jetons, construction, validation, calcul, format)
//! - app   : session (touches, annulation) + journal d’historique

pub mod app;
pub mod noyau;

pub use app::{ErreurSession, JournalHistorique, Session, Touche};
pub use noyau::{ConfigCalculatrice, ProcesseurRequete, Requete};
