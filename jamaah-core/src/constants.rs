/// Number of days the backfill scan looks back when no start date is given
pub const DEFAULT_BACKFILL_DAYS: i64 = 14;

/// Julian Day Number of the first day of the Gregorian calendar (1582-10-15)
pub const GREGORIAN_REFORM_JDN: i64 = 2_299_161;

/// Offset added to the tabular Hijri day count to obtain a JDN
pub const ISLAMIC_EPOCH_OFFSET: i64 = 1_948_439;

/// Mean Earth radius used by the haversine distance
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Largest moon-sighting shift, in days, accepted for `hijri_offset`
pub const MAX_HIJRI_OFFSET: i64 = 3;

/// Default tolerance (degrees) under which a heading counts as facing the Qibla
pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 5.0;
