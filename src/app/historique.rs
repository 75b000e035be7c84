//! src/app/historique.rs
//!
//! Journal d’historique (en mémoire).
//!
//! Rôle : stocker les messages validés ("2 + 2 = 4") en ajout seul,
//! et les diffuser en direct aux abonnés.
//!
//! Contrats :
//! - Ajout seul : aucune entrée n’est modifiée ni retirée.
//! - Un abonné reçoit les messages ajoutés APRÈS son abonnement (pas le passé : voir `entrees`).
//! - Un abonné disparu (Receiver lâché) est oublié au prochain ajout.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

#[derive(Default)]
struct Interne {
    entrees: Vec<String>,
    abonnes: Vec<Sender<String>>,
}

#[derive(Default)]
pub struct JournalHistorique {
    interne: Mutex<Interne>,
}

impl JournalHistorique {
    pub fn new() -> Self {
        Self::default()
    }

    fn verrou(&self) -> MutexGuard<'_, Interne> {
        // un écrivain qui a paniqué n’invalide pas un journal en ajout seul
        self.interne.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ajoute un message ; retourne sa position dans le journal.
    pub fn ajouter(&self, message: impl Into<String>) -> usize {
        let message = message.into();
        let mut g = self.verrou();

        g.abonnes.retain(|tx| tx.send(message.clone()).is_ok());
        g.entrees.push(message);

        let position = g.entrees.len() - 1;
        info!(position, abonnes = g.abonnes.len(), "historique: ajout");
        position
    }

    /// Toutes les entrées, dans l’ordre d’ajout.
    pub fn entrees(&self) -> Vec<String> {
        self.verrou().entrees.clone()
    }

    pub fn len(&self) -> usize {
        self.verrou().entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flux direct des prochains messages (depuis maintenant).
    pub fn abonner(&self) -> Receiver<String> {
        let (tx, rx) = channel();
        let mut g = self.verrou();
        g.abonnes.push(tx);
        debug!(abonnes = g.abonnes.len(), "historique: abonnement");
        rx
    }
}
