/// Détecteur de bascule de mois, sous forme de valeur d'accumulation.
///
/// Chaque entrée fait avancer le curseur ; dès qu'un jour est inférieur au plus
/// grand jour déjà vu, le roster est passé au mois suivant et le décalage d'un
/// mois reste acquis jusqu'à la fin de la séquence. Une seule bascule est gérée.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthCursor {
    prev_day: u32,
    rolled_over: bool,
}

impl MonthCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retourne le curseur à utiliser pour l'entrée `day`.
    #[must_use]
    pub fn advance(self, day: u32) -> Self {
        Self {
            prev_day: self.prev_day.max(day),
            rolled_over: self.rolled_over || day < self.prev_day,
        }
    }

    /// Décalage (en mois) appliqué à l'entrée courante : 0 ou 1.
    pub fn month_offset(&self) -> u32 {
        u32::from(self.rolled_over)
    }

    pub fn prev_day(&self) -> u32 {
        self.prev_day
    }

    pub fn rolled_over(&self) -> bool {
        self.rolled_over
    }
}
