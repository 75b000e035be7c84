// src/noyau/jetons.rs
//
// Modèle de jetons
// ----------------
// Deux sortes, décidées UNE fois (à la construction) :
// - Operande(texte)  : texte tel qu’affiché (séparateur décimal configuré), fini ou infini
// - Operateur        : symbole de l’alphabet + drapeau “unaire à gauche”
//
// Le texte brut ne sert qu’aux prédicats de classification (is_operand, ...).

use std::fmt;

use thiserror::Error;

use super::config::ConfigCalculatrice;

/// Jeton pourcentage (réécrit au moment du calcul).
pub const POURCENT: &str = "%";

/// Signe moins collé à un opérande.
pub const MOINS: char = '-';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErreurJeton {
    #[error("jeton inconnu: '{0}'")]
    Inconnu(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    Operande(String),
    Operateur { symbole: String, unaire_gauche: bool },
}

/// Valeur numérique d’un texte d’opérande.
/// None si vide, non numérique ou NaN (les infinis sont des opérandes).
pub fn valeur_operande(texte: &str, point: &str) -> Option<f64> {
    if texte.is_empty() {
        return None;
    }
    let v = if point == "." {
        texte.parse::<f64>().ok()?
    } else {
        texte.replace(point, ".").parse::<f64>().ok()?
    };
    (!v.is_nan()).then_some(v)
}

pub fn is_operand(texte: &str, point: &str) -> bool {
    valeur_operande(texte, point).is_some()
}

pub fn is_infinite_operand(texte: &str, point: &str) -> bool {
    valeur_operande(texte, point).is_some_and(|v| !v.is_finite())
}

impl Jeton {
    /// Classe un texte brut selon la configuration (opérateur prioritaire).
    pub fn classer(texte: &str, config: &ConfigCalculatrice) -> Result<Jeton, ErreurJeton> {
        if config.is_operator(texte) {
            return Ok(Jeton::operateur(texte, config));
        }
        if is_operand(texte, &config.point) {
            return Ok(Jeton::Operande(texte.to_string()));
        }
        Err(ErreurJeton::Inconnu(texte.to_string()))
    }

    /// Opérateur avec le drapeau unaire lu dans la configuration.
    pub fn operateur(symbole: &str, config: &ConfigCalculatrice) -> Jeton {
        Jeton::Operateur {
            symbole: symbole.to_string(),
            unaire_gauche: config.is_left_unary_operator(symbole),
        }
    }

    pub fn texte(&self) -> &str {
        match self {
            Jeton::Operande(t) => t,
            Jeton::Operateur { symbole, .. } => symbole,
        }
    }

    pub fn est_operande(&self) -> bool {
        matches!(self, Jeton::Operande(_))
    }

    pub fn est_operateur(&self) -> bool {
        matches!(self, Jeton::Operateur { .. })
    }

    pub fn est_unaire_gauche(&self) -> bool {
        matches!(
            self,
            Jeton::Operateur {
                unaire_gauche: true,
                ..
            }
        )
    }

    pub fn est_operande_infini(&self, point: &str) -> bool {
        match self {
            Jeton::Operande(t) => is_infinite_operand(t, point),
            Jeton::Operateur { .. } => false,
        }
    }

    /// Opérande fini (celui qu’on peut encore “allonger” chiffre par chiffre).
    pub fn est_operande_fini(&self, point: &str) -> bool {
        self.est_operande() && !self.est_operande_infini(point)
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.texte())
    }
}
