//! src/app/etat.rs
//!
//! Session de calculatrice (état, sans affichage).
//!
//! Rôle : garder la requête courante, les instantanés précédents (annulation)
//! et le dernier résultat ; traduire chaque touche en UNE opération du noyau.
//!
//! Contrats :
//! - La requête n’est jamais modifiée sur place : chaque touche produit une nouvelle valeur.
//! - Un instantané n’est empilé que si la touche a réellement changé la requête.
//! - "=" : résultat poussé dans l’historique ("<requête> = <résultat>"),
//!   puis la requête devient [résultat] (on peut enchaîner).

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::historique::JournalHistorique;
use crate::noyau::{ErreurExpression, EvaluateurExpression, Jeton, ProcesseurRequete, Requete};

/// Garde-fou : nombre max d’instantanés gardés pour l’annulation.
const ANNULATIONS_MAX: usize = 64;

/// Touche “signe” acceptée en texte (en plus de ±).
pub const TOUCHE_SIGNE: &str = "+/-";

#[derive(Debug, Error, PartialEq)]
pub enum ErreurSession {
    #[error("touche inconnue: '{0}'")]
    ToucheInconnue(String),

    #[error("calcul impossible: {0}")]
    Calcul(#[from] ErreurExpression),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(String),
    Point,
    Operateur(String),
    Signe,
    Effacer,
    Annuler,
    Egal,
}

impl Touche {
    /// Lit une touche tapée en texte (front console).
    pub fn depuis_texte<E>(
        mot: &str,
        processeur: &ProcesseurRequete<E>,
    ) -> Result<Touche, ErreurSession> {
        let config = processeur.config();
        let touche = match mot {
            "=" => Touche::Egal,
            "C" | "c" => Touche::Effacer,
            "U" | "u" => Touche::Annuler,
            "±" | TOUCHE_SIGNE => Touche::Signe,
            _ if mot == config.point => Touche::Point,
            _ if config.is_operator(mot) => Touche::Operateur(mot.to_string()),
            _ if !mot.is_empty() && mot.chars().all(|c| c.is_ascii_digit()) => {
                Touche::Chiffre(mot.to_string())
            }
            _ => return Err(ErreurSession::ToucheInconnue(mot.to_string())),
        };
        Ok(touche)
    }
}

pub struct Session<E> {
    processeur: ProcesseurRequete<E>,
    requete: Requete,
    precedentes: Vec<Requete>,
    dernier_resultat: Option<String>,
    journal: Arc<JournalHistorique>,
}

impl<E: EvaluateurExpression> Session<E> {
    pub fn new(processeur: ProcesseurRequete<E>, journal: Arc<JournalHistorique>) -> Self {
        Self {
            processeur,
            requete: Requete::vide(),
            precedentes: Vec::new(),
            dernier_resultat: None,
            journal,
        }
    }

    pub fn requete(&self) -> &Requete {
        &self.requete
    }

    pub fn dernier_resultat(&self) -> Option<&str> {
        self.dernier_resultat.as_deref()
    }

    pub fn processeur(&self) -> &ProcesseurRequete<E> {
        &self.processeur
    }

    pub fn peut_annuler(&self) -> bool {
        !self.precedentes.is_empty()
    }

    /// Vrai si "=" produirait un résultat (ex : activer le bouton).
    pub fn est_calculable(&self) -> bool {
        crate::noyau::validation::is_computable(&self.requete)
    }

    /// Applique une touche. Retourne vrai si la requête a changé.
    pub fn appuyer(&mut self, touche: &Touche) -> Result<bool, ErreurSession> {
        let p = &self.processeur;
        let q = &self.requete;

        let nouvelle = match touche {
            Touche::Chiffre(c) => p.add_operand(q, c),
            Touche::Point => p.add_point(q, q.len().saturating_sub(1)),
            Touche::Operateur(o) => p.add_operator(q, o),
            Touche::Signe => p.switch_last_operand_sign(q),
            Touche::Effacer => p.clear(),
            Touche::Annuler => return Ok(self.annuler()),
            Touche::Egal => return self.egal(),
        };

        Ok(self.remplacer(nouvelle))
    }

    /// Applique une suite de touches ; s’arrête à la première erreur.
    pub fn appuyer_tout<'a>(
        &mut self,
        touches: impl IntoIterator<Item = &'a Touche>,
    ) -> Result<(), ErreurSession> {
        for t in touches {
            self.appuyer(t)?;
        }
        Ok(())
    }

    fn remplacer(&mut self, nouvelle: Requete) -> bool {
        if nouvelle == self.requete {
            return false;
        }
        let ancienne = std::mem::replace(&mut self.requete, nouvelle);
        self.precedentes.push(ancienne);
        if self.precedentes.len() > ANNULATIONS_MAX {
            self.precedentes.remove(0);
        }
        true
    }

    fn annuler(&mut self) -> bool {
        match self.precedentes.pop() {
            Some(precedente) => {
                self.requete = precedente;
                true
            }
            None => false,
        }
    }

    fn egal(&mut self) -> Result<bool, ErreurSession> {
        let Some(resultat) = self.processeur.calculate(&self.requete)? else {
            debug!(requete = %self.requete, "=: pas calculable");
            return Ok(false);
        };

        self.journal.ajouter(format!("{} = {}", self.requete, resultat));

        // NaN n’est pas un opérande : on repart d’une requête vide
        let suite = match Jeton::classer(&resultat, self.processeur.config()) {
            Ok(j @ Jeton::Operande(_)) => std::iter::once(j).collect::<Requete>(),
            _ => Requete::vide(),
        };
        self.dernier_resultat = Some(resultat);
        Ok(self.remplacer(suite))
    }
}
