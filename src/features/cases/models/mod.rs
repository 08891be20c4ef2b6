mod case;

pub use case::{Case, CaseStatus, CurrencyCode, MisconductStatus, OrganisationType, TipType};
