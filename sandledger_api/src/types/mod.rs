mod de;
pub use self::de::{date_from_str, number_from_value};

mod asset;
pub use self::asset::{Asset, AssetID, AssetPayload};

mod income;
pub use self::income::{DailyIncome, IncomeID, IncomePayload};

mod lookup;
pub use self::lookup::{Project, ProjectID, Ship, ShipID};
