//! Syntactic SMILES validation and atom tallying.
//!
//! This is a lexical/grammatical check only: it guarantees a string *looks*
//! like SMILES (balanced branches, paired ring closures, sane bond placement),
//! not that it denotes a chemically sensible molecule. That is exactly the
//! parseability contract the generator needs.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Atom { symbol: String, aromatic: bool },
    Bond(char),
    Open,
    Close,
    Ring(u8),
    Dot,
}

/// Lexes a SMILES string. Returns `None` on any malformed token.
fn tokenize(smiles: &str) -> Option<Vec<Token>> {
    let bytes = smiles.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            // Two-letter organic-subset atoms first.
            'C' if bytes.get(i + 1) == Some(&b'l') => {
                tokens.push(Token::Atom { symbol: "Cl".to_string(), aromatic: false });
                i += 2;
            }
            'B' if bytes.get(i + 1) == Some(&b'r') => {
                tokens.push(Token::Atom { symbol: "Br".to_string(), aromatic: false });
                i += 2;
            }
            'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' => {
                tokens.push(Token::Atom { symbol: c.to_string(), aromatic: false });
                i += 1;
            }
            'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
                tokens.push(Token::Atom {
                    symbol: c.to_ascii_uppercase().to_string(),
                    aromatic: true,
                });
                i += 1;
            }
            '[' => {
                let close = smiles[i + 1..].find(']').map(|off| i + 1 + off)?;
                let body = &smiles[i + 1..close];
                let symbol = bracket_element(body)?;
                let aromatic = body.chars().find(|ch| ch.is_ascii_alphabetic())?.is_lowercase();
                tokens.push(Token::Atom { symbol, aromatic });
                i = close + 1;
            }
            '-' | '=' | '#' | '$' | ':' | '/' | '\\' => {
                tokens.push(Token::Bond(c));
                i += 1;
            }
            '(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            ')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            '0'..='9' => {
                tokens.push(Token::Ring(c as u8 - b'0'));
                i += 1;
            }
            '%' => {
                let d1 = (*bytes.get(i + 1)? as char).to_digit(10)?;
                let d2 = (*bytes.get(i + 2)? as char).to_digit(10)?;
                tokens.push(Token::Ring((d1 * 10 + d2) as u8));
                i += 3;
            }
            '.' => {
                tokens.push(Token::Dot);
                i += 1;
            }
            _ => return None,
        }
    }
    Some(tokens)
}

/// Extracts the element symbol from a bracket-atom body such as `NH4+`,
/// `13CH4` or `Na+`. Isotope digits are skipped; charge and H-count are not
/// validated beyond being left in place.
fn bracket_element(body: &str) -> Option<String> {
    let rest = body.trim_start_matches(|ch: char| ch.is_ascii_digit());
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    const TWO_LETTER: [&str; 12] =
        ["Cl", "Br", "Na", "Si", "Se", "Li", "Mg", "Ca", "Fe", "Zn", "Cu", "Mn"];
    if let Some(second) = chars.next() {
        let pair: String = [first, second].iter().collect();
        if TWO_LETTER.contains(&pair.as_str()) {
            return Some(pair);
        }
    }
    Some(first.to_ascii_uppercase().to_string())
}

/// Checks whether `smiles` is syntactically parseable.
pub fn is_valid(smiles: &str) -> bool {
    let Some(tokens) = tokenize(smiles) else {
        return false;
    };

    let mut depth: i32 = 0;
    let mut open_rings: HashSet<u8> = HashSet::new();
    let mut have_atom = false; // an atom precedes the current position
    let mut pending_bond = false;
    let mut atom_count = 0usize;
    let mut prev_open = false;

    for token in &tokens {
        match token {
            Token::Atom { .. } => {
                atom_count += 1;
                have_atom = true;
                pending_bond = false;
            }
            Token::Bond(_) => {
                if !have_atom || pending_bond {
                    return false;
                }
                pending_bond = true;
            }
            Token::Open => {
                if !have_atom || pending_bond {
                    return false;
                }
                depth += 1;
            }
            Token::Close => {
                if prev_open || pending_bond {
                    return false; // empty branch, or a bond dangling into ')'
                }
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Token::Ring(id) => {
                if !have_atom {
                    return false;
                }
                pending_bond = false;
                if !open_rings.remove(id) {
                    open_rings.insert(*id);
                }
            }
            Token::Dot => {
                if pending_bond || !have_atom {
                    return false;
                }
                have_atom = false;
            }
        }
        prev_open = matches!(token, Token::Open);
    }

    atom_count > 0 && depth == 0 && open_rings.is_empty() && !pending_bond
}

/// Heavy-atom and bond tally used by the descriptor heuristics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomTally {
    pub carbons: u32,
    pub nitrogens: u32,
    pub oxygens: u32,
    pub sulfurs: u32,
    pub phosphorus: u32,
    pub fluorines: u32,
    pub chlorines: u32,
    pub bromines: u32,
    pub iodines: u32,
    /// Element symbols of bracket atoms outside the organic subset.
    pub others: Vec<String>,
    pub aromatic_atoms: u32,
    pub ring_closures: u32,
    pub double_bonds: u32,
    pub triple_bonds: u32,
}

impl AtomTally {
    pub fn halogens(&self) -> u32 {
        self.fluorines + self.chlorines + self.bromines + self.iodines
    }

    pub fn heavy_atoms(&self) -> u32 {
        self.carbons
            + self.nitrogens
            + self.oxygens
            + self.sulfurs
            + self.phosphorus
            + self.halogens()
            + self.others.len() as u32
    }
}

/// Tallies atoms and bonds of a SMILES string. `None` if it does not lex.
pub fn tally(smiles: &str) -> Option<AtomTally> {
    let tokens = tokenize(smiles)?;
    let mut t = AtomTally::default();
    let mut open_rings: HashSet<u8> = HashSet::new();
    for token in &tokens {
        match token {
            Token::Atom { symbol, aromatic } => {
                if *aromatic {
                    t.aromatic_atoms += 1;
                }
                match symbol.as_str() {
                    "C" => t.carbons += 1,
                    "N" => t.nitrogens += 1,
                    "O" => t.oxygens += 1,
                    "S" => t.sulfurs += 1,
                    "P" => t.phosphorus += 1,
                    "F" => t.fluorines += 1,
                    "Cl" => t.chlorines += 1,
                    "Br" => t.bromines += 1,
                    "I" => t.iodines += 1,
                    "B" => t.others.push("B".to_string()),
                    other => t.others.push(other.to_string()),
                }
            }
            Token::Bond('=') => t.double_bonds += 1,
            Token::Bond('#') | Token::Bond('$') => t.triple_bonds += 1,
            Token::Ring(id) => {
                if open_rings.remove(id) {
                    t.ring_closures += 1;
                } else {
                    open_rings.insert(*id);
                }
            }
            _ => {}
        }
    }
    Some(t)
}
