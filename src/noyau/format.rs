// src/noyau/format.rs
//
// Affichage du résultat : arrondi à `digits_after_point`, puis forme “optimisée”
// - 3.50 -> 3.5 ; 4.00 -> 4 (un entier n’affiche jamais de séparateur)
// - infinis -> Infinity / -Infinity (relisibles comme opérandes)
// - le "." interne devient le point configuré
//
// Arrondi : sur la valeur binaire exacte, demi vers l’extérieur (2.5 -> 3, -2.5 -> -3).

/// Assez de décimales pour écrire exactement n’importe quel f64 (plus petit sous-normal : 2^-1074).
const DECIMALES_EXACTES: usize = 1074;

/// Formate une valeur numérique pour l’affichage.
pub fn format_resultat(valeur: f64, digits_after_point: usize, point: &str) -> String {
    if valeur.is_nan() {
        return "NaN".to_string();
    }
    if valeur.is_infinite() {
        return if valeur > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let mut texte = arrondi_fixe(valeur, digits_after_point);

    // zéros de queue : seulement dans la partie décimale
    if texte.contains('.') {
        let garde = texte.trim_end_matches('0').trim_end_matches('.').len();
        texte.truncate(garde);
    }

    // -0.001 arrondi à 2 chiffres => "-0"
    if texte == "-0" {
        texte = "0".to_string();
    }

    if point != "." {
        texte = texte.replace('.', point);
    }
    texte
}

/// `digits` décimales, demi arrondi en s’éloignant de zéro.
fn arrondi_fixe(valeur: f64, digits: usize) -> String {
    let exact = format!("{:.*}", DECIMALES_EXACTES, valeur.abs());
    let (entier, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let digits = digits.min(fraction.len());

    let mut chiffres: Vec<u8> = entier.bytes().chain(fraction[..digits].bytes()).collect();

    // le reste exact vaut au moins un demi : on monte
    if fraction.as_bytes().get(digits).is_some_and(|&c| c >= b'5') {
        let mut i = chiffres.len();
        loop {
            if i == 0 {
                chiffres.insert(0, b'1');
                break;
            }
            i -= 1;
            if chiffres[i] == b'9' {
                chiffres[i] = b'0';
            } else {
                chiffres[i] += 1;
                break;
            }
        }
    }

    let coupure = chiffres.len() - digits;
    let mut texte = String::with_capacity(chiffres.len() + 2);
    if valeur.is_sign_negative() {
        texte.push('-');
    }
    texte.extend(chiffres[..coupure].iter().map(|&c| char::from(c)));
    if digits > 0 {
        texte.push('.');
        texte.extend(chiffres[coupure..].iter().map(|&c| char::from(c)));
    }
    texte
}
