//! Exchange special-time tables as keyed constant data.
//!
//! Each entry maps (category, unit, length, session shape) to the cutovers a
//! bar of that kind closes on. `None` in the length or shape column matches
//! any value. Lookup takes the first matching entry.

use serde::Serialize;

use super::table::{Cutover, SpecialTimeTable};
use crate::domain::{IntervalUnit, ProductCategory, SessionShape};

/// Units that have special-time tables. Weekly bars reuse the daily table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableUnit {
    Minute,
    Hour,
    Daily,
}

impl TableUnit {
    pub fn for_interval(unit: IntervalUnit) -> Option<Self> {
        match unit {
            IntervalUnit::Minute => Some(TableUnit::Minute),
            IntervalUnit::Hour => Some(TableUnit::Hour),
            IntervalUnit::Daily | IntervalUnit::Weekly => Some(TableUnit::Daily),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableKey {
    pub category: ProductCategory,
    pub unit: TableUnit,
    pub length: Option<u32>,
    pub shape: Option<SessionShape>,
}

impl TableKey {
    fn matches(
        &self,
        category: ProductCategory,
        unit: TableUnit,
        length: u32,
        shape: Option<SessionShape>,
    ) -> bool {
        self.category == category
            && self.unit == unit
            && self.length.map_or(true, |l| l == length)
            && self.shape.map_or(true, |s| Some(s) == shape)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    pub key: TableKey,
    pub table: SpecialTimeTable,
}

const fn entry(
    category: ProductCategory,
    unit: TableUnit,
    length: Option<u32>,
    shape: Option<SessionShape>,
    table: SpecialTimeTable,
) -> TableEntry {
    TableEntry { key: TableKey { category, unit, length, shape }, table }
}

use super::table::Cutover as C;
use crate::domain::ProductCategory::{Bonds, Commodity, StockIndex};
use crate::domain::SessionShape::{DayOnly, NightUntil0100, NightUntil0230, NightUntil2300};
use TableUnit::{Daily, Hour, Minute};

const fn commodity_hour(length: u32, shape: SessionShape, table: SpecialTimeTable) -> TableEntry {
    entry(Commodity, Hour, Some(length), Some(shape), table)
}

static TABLES: &[TableEntry] = &[
    // ── Minute ──────────────────────────────────────────────────────
    // 30-minute commodity bars bend around the 10:15-10:30 break.
    entry(
        Commodity,
        Minute,
        Some(30),
        None,
        SpecialTimeTable::after(10, 0, &[
            C::at(10, 45),
            C::at(11, 15),
            C::at(13, 45),
            C::at(14, 15),
            C::at(14, 45),
            C::at(15, 0),
        ]),
    ),
    // Bond futures trade on to 15:15 after the 15:00 close.
    entry(Bonds, Minute, None, None, SpecialTimeTable::after(15, 0, &[C::at(15, 15)])),
    // ── Hour: commodity, no night session ──────────────────────────
    commodity_hour(1, DayOnly, SpecialTimeTable::after(9, 0, &[
        C::at(10, 0),
        C::at(11, 15),
        C::at(14, 15),
        C::at(15, 0),
    ])),
    commodity_hour(2, DayOnly, SpecialTimeTable::after(9, 0, &[C::at(11, 15), C::at(15, 0)])),
    commodity_hour(3, DayOnly, SpecialTimeTable::after(9, 0, &[C::at(14, 15), C::at(15, 0)])),
    commodity_hour(4, DayOnly, SpecialTimeTable::after(9, 0, &[C::at(15, 0)])),
    // ── Hour: commodity, night session to 23:00 ────────────────────
    commodity_hour(1, NightUntil2300, SpecialTimeTable::after(9, 0, &[
        C::at(10, 0),
        C::at(11, 15),
        C::at(14, 15),
        C::at(15, 0),
        C::at(22, 0),
        C::at(23, 0),
    ])),
    commodity_hour(2, NightUntil2300, SpecialTimeTable::after(9, 0, &[
        C::at(11, 15),
        C::at(15, 0),
        C::at(23, 0),
    ])),
    commodity_hour(3, NightUntil2300, SpecialTimeTable::after(9, 0, &[
        C::at(10, 0),
        C::at(15, 0),
        C::next_day(10, 0).crossing(),
    ])),
    commodity_hour(4, NightUntil2300, SpecialTimeTable::after(9, 0, &[
        C::at(11, 15),
        C::at(15, 0),
        C::next_day(11, 15).crossing(),
    ])),
    // ── Hour: commodity, night session to 01:00 ────────────────────
    commodity_hour(1, NightUntil0100, SpecialTimeTable::open(&[
        C::at(1, 0),
        C::at(10, 0),
        C::at(11, 15),
        C::at(14, 15),
        C::at(15, 0),
        C::at(22, 0),
        C::at(23, 0),
        C::next_day(0, 0),
    ])),
    commodity_hour(2, NightUntil0100, SpecialTimeTable::open(&[
        C::at(1, 0),
        C::at(11, 15),
        C::at(15, 0),
        C::at(23, 0),
        C::next_day(1, 0),
    ])),
    commodity_hour(3, NightUntil0100, SpecialTimeTable::open(&[
        C::at(11, 15).crossing(),
        C::at(15, 0),
        C::next_day(0, 0),
    ])),
    commodity_hour(4, NightUntil0100, SpecialTimeTable::open(&[
        C::at(1, 0),
        C::at(15, 0),
        C::next_day(1, 0),
    ])),
    // ── Hour: commodity, night session to 02:30 ────────────────────
    commodity_hour(1, NightUntil0230, SpecialTimeTable::open(&[
        C::at(1, 0),
        C::at(2, 0),
        C::at(9, 30).crossing(),
        C::at(10, 45),
        C::at(13, 45),
        C::at(14, 45),
        C::at(15, 0),
        C::at(22, 0),
        C::at(23, 0),
        C::next_day(0, 0),
    ])),
    commodity_hour(2, NightUntil0230, SpecialTimeTable::open(&[
        C::at(1, 0),
        C::at(9, 30).crossing(),
        C::at(13, 45),
        C::at(15, 0),
        C::at(23, 0),
        C::next_day(1, 0),
    ])),
    commodity_hour(3, NightUntil0230, SpecialTimeTable::open(&[
        C::at(9, 30).crossing(),
        C::at(14, 45),
        C::at(15, 0),
        C::next_day(0, 0),
    ])),
    commodity_hour(4, NightUntil0230, SpecialTimeTable::open(&[
        C::at(1, 0),
        C::at(13, 45).crossing(),
        C::at(15, 0),
        C::next_day(1, 0),
    ])),
    // ── Hour: financial futures ────────────────────────────────────
    entry(StockIndex, Hour, Some(1), None, SpecialTimeTable::after(9, 30, &[
        C::at(10, 30),
        C::at(11, 30),
        C::at(14, 0),
        C::at(15, 0),
    ])),
    entry(StockIndex, Hour, Some(2), None, SpecialTimeTable::after(9, 30, &[
        C::at(11, 30),
        C::at(15, 0),
    ])),
    entry(Bonds, Hour, Some(1), None, SpecialTimeTable::after(9, 30, &[
        C::at(10, 30),
        C::at(11, 30),
        C::at(14, 0),
        C::at(15, 0),
        C::at(15, 15),
    ])),
    entry(Bonds, Hour, Some(2), None, SpecialTimeTable::after(9, 30, &[
        C::at(11, 30),
        C::at(15, 0),
        C::at(15, 15),
    ])),
    // ── Daily / weekly session ends ────────────────────────────────
    // Night ticks belong to the next day's 15:00 close.
    entry(Commodity, Daily, Some(1), None, SpecialTimeTable::open(&[
        C::at(15, 0),
        C::next_day(15, 0),
    ])),
    entry(StockIndex, Daily, Some(1), None, SpecialTimeTable::after(9, 30, &[C::at(15, 0)])),
    entry(Bonds, Daily, Some(1), None, SpecialTimeTable::after(9, 30, &[C::at(15, 15)])),
];

/// Every keyed table, in lookup order.
pub fn all_tables() -> &'static [TableEntry] {
    TABLES
}

/// Special-time table for a bar kind, if the exchange defines one.
pub fn resolve(
    category: ProductCategory,
    unit: TableUnit,
    length: u32,
    shape: Option<SessionShape>,
) -> Option<&'static SpecialTimeTable> {
    TABLES
        .iter()
        .find(|e| e.key.matches(category, unit, length, shape))
        .map(|e| &e.table)
}
