// src/noyau/validation.rs
//
// Prédicats sur la requête entière (limite d’opérandes, calculabilité).

use super::requete::Requete;

pub fn operand_count(requete: &Requete) -> usize {
    requete.jetons().iter().filter(|j| j.est_operande()).count()
}

pub fn operator_count(requete: &Requete) -> usize {
    requete.jetons().iter().filter(|j| j.est_operateur()).count()
}

pub fn at_operand_limit(requete: &Requete, max_operands: usize) -> bool {
    operand_count(requete) == max_operands
}

/// Calculable si :
/// - au moins deux opérandes et un opérateur, OU
/// - un seul opérande et un opérateur unaire à gauche en position 1 (index fixe, volontairement).
///
/// Tout autre cas à un opérande est “pas calculable” (pas une erreur).
pub fn is_computable(requete: &Requete) -> bool {
    let operandes = operand_count(requete);

    (operandes > 1 && operator_count(requete) > 0)
        || (operandes == 1 && requete.get(1).is_some_and(|j| j.est_unaire_gauche()))
}
