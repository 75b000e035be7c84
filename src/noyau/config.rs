// src/noyau/config.rs
//
// Configuration du moteur (fournie une seule fois, immuable ensuite)
// ------------------------------------------------------------------
// - point                : séparateur décimal affiché ("." par défaut)
// - operators            : alphabet des opérateurs
// - left_unary_operators : sous-ensemble unaire à gauche (s’applique à l’opérande qui précède)
// - max_operands         : nombre max d’opérandes dans une requête
// - digits_after_point   : précision de sortie
//
// Chargement : valeurs par défaut, ou fichier TOML (champs absents => défaut).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::jetons::{valeur_operande, MOINS, POURCENT};

/// Précision par défaut (chiffres après le point).
pub const DIGITS_DEFAUT: usize = 10;

/// Garde-fou : au-delà, un f64 n’a plus rien à dire.
pub const DIGITS_MAX: usize = 20;

/// Nombre d’opérandes par défaut (calculatrice “a op b”).
pub const MAX_OPERANDES_DEFAUT: usize = 2;

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("séparateur décimal invalide: '{0}'")]
    PointInvalide(String),

    #[error("opérateur invalide: '{0}'")]
    OperateurInvalide(String),

    #[error("opérateur unaire à gauche absent de l’alphabet: '{0}'")]
    UnaireHorsAlphabet(String),

    #[error("max_operands doit être > 0")]
    MaxOperandesNul,

    #[error("digits_after_point trop grand: {0} (max {max})", max = DIGITS_MAX)]
    PrecisionTropGrande(usize),

    #[error("lecture de la configuration impossible: {0}")]
    Lecture(#[from] std::io::Error),

    #[error("configuration TOML invalide: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigCalculatrice {
    pub point: String,
    pub operators: BTreeSet<String>,
    pub left_unary_operators: BTreeSet<String>,
    pub max_operands: usize,
    pub digits_after_point: usize,
}

impl Default for ConfigCalculatrice {
    fn default() -> Self {
        let ops = |liste: &[&str]| -> BTreeSet<String> {
            liste.iter().map(|s| s.to_string()).collect()
        };
        Self {
            point: ".".to_string(),
            operators: ops(&["+", "-", "*", "/", POURCENT]),
            left_unary_operators: ops(&[POURCENT]),
            max_operands: MAX_OPERANDES_DEFAUT,
            digits_after_point: DIGITS_DEFAUT,
        }
    }
}

impl ConfigCalculatrice {
    /// Lit une configuration TOML puis la valide.
    pub fn depuis_toml(texte: &str) -> Result<Self, ErreurConfig> {
        let config: Self = toml::from_str(texte)?;
        config.valider()?;
        Ok(config)
    }

    /// Lit un fichier TOML puis le valide.
    pub fn charger(chemin: impl AsRef<Path>) -> Result<Self, ErreurConfig> {
        let texte = fs::read_to_string(chemin)?;
        Self::depuis_toml(&texte)
    }

    pub fn is_operator(&self, texte: &str) -> bool {
        self.operators.contains(texte)
    }

    pub fn is_left_unary_operator(&self, texte: &str) -> bool {
        self.left_unary_operators.contains(texte)
    }

    /// Vérifie la cohérence (les opérations du moteur supposent une config valide).
    pub fn valider(&self) -> Result<(), ErreurConfig> {
        // Le point est collé aux chiffres : il ne doit ni être un chiffre, ni un signe,
        // ni un opérateur, ni contenir d’espace (les jetons sont joints par des espaces).
        let point_invalide = self.point.is_empty()
            || self
                .point
                .chars()
                .any(|c| c.is_ascii_digit() || c == MOINS || c.is_whitespace())
            || self.is_operator(&self.point);
        if point_invalide {
            return Err(ErreurConfig::PointInvalide(self.point.clone()));
        }

        for op in &self.operators {
            let ambigu = op.is_empty()
                || op.chars().any(char::is_whitespace)
                || valeur_operande(op, &self.point).is_some();
            if ambigu {
                return Err(ErreurConfig::OperateurInvalide(op.clone()));
            }
        }

        if let Some(op) = self
            .left_unary_operators
            .iter()
            .find(|op| !self.operators.contains(*op))
        {
            return Err(ErreurConfig::UnaireHorsAlphabet(op.clone()));
        }

        if self.max_operands == 0 {
            return Err(ErreurConfig::MaxOperandesNul);
        }

        if self.digits_after_point > DIGITS_MAX {
            return Err(ErreurConfig::PrecisionTropGrande(self.digits_after_point));
        }

        Ok(())
    }
}
