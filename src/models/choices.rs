//! Enumerated screener filter domains.
//!
//! `Display` yields the wire code the site expects in query strings; parsing
//! accepts either that code or the symbolic name, ignoring ASCII case.

use std::{fmt::Display, str::FromStr};

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ValidationError;

#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Exchange {
    #[strum(to_string = "exch_amex", serialize = "AMEX")]
    Amex,
    #[strum(to_string = "exch_nasd", serialize = "NASDAQ")]
    Nasdaq,
    #[strum(to_string = "exch_nyse", serialize = "NYSE")]
    Nyse,
}

#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Index {
    #[strum(to_string = "idx_sp500", serialize = "SP500")]
    Sp500,
    #[strum(to_string = "idx_ndx", serialize = "NASDAQ100")]
    Nasdaq100,
    #[strum(to_string = "idx_dji", serialize = "DJIA")]
    Djia,
    #[strum(to_string = "idx_rut", serialize = "RUSSELL2000")]
    Russell2000,
}

#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Signal {
    #[strum(to_string = "ta_topgainers", serialize = "TOP_GAINERS")]
    TopGainers,
    #[strum(to_string = "ta_toplosers", serialize = "TOP_LOSERS")]
    TopLosers,
    #[strum(to_string = "ta_newhigh", serialize = "NEW_HIGH")]
    NewHigh,
    #[strum(to_string = "ta_newlow", serialize = "NEW_LOW")]
    NewLow,
    #[strum(to_string = "ta_mostvolatile", serialize = "MOST_VOLATILE")]
    MostVolatile,
    #[strum(to_string = "ta_mostactive", serialize = "MOST_ACTIVE")]
    MostActive,
    #[strum(to_string = "ta_unusualvolume", serialize = "UNUSUAL_VOLUME")]
    UnusualVolume,
    #[strum(to_string = "ta_overbought", serialize = "OVERBOUGHT")]
    Overbought,
    #[strum(to_string = "ta_oversold", serialize = "OVERSOLD")]
    Oversold,
    #[strum(to_string = "n_downgrades", serialize = "DOWNGRADES")]
    Downgrades,
    #[strum(to_string = "n_upgrades", serialize = "UPGRADES")]
    Upgrades,
    #[strum(to_string = "n_earningsbefore", serialize = "EARNINGS_BEFORE")]
    EarningsBefore,
    #[strum(to_string = "n_earningsafter", serialize = "EARNINGS_AFTER")]
    EarningsAfter,
    #[strum(to_string = "it_latestbuys", serialize = "RECENT_INSIDER_BUYING")]
    RecentInsiderBuying,
    #[strum(to_string = "it_latestsales", serialize = "RECENT_INSIDER_SELLING")]
    RecentInsiderSelling,
    #[strum(to_string = "n_majornews", serialize = "MAJOR_NEWS")]
    MajorNews,
    #[strum(to_string = "ta_p_horizontal", serialize = "HORIZONTAL_SR")]
    HorizontalSr,
    #[strum(to_string = "ta_p_tlresistance", serialize = "TL_RESISTANCE")]
    TlResistance,
    #[strum(to_string = "ta_p_tlsupport", serialize = "TL_SUPPORT")]
    TlSupport,
    #[strum(to_string = "ta_p_wedgeup", serialize = "WEDGE_UP")]
    WedgeUp,
    #[strum(to_string = "ta_p_wedgedown", serialize = "WEDGE_DOWN")]
    WedgeDown,
    #[strum(to_string = "ta_p_wedgeresistance", serialize = "TRIANGLE_ASC")]
    TriangleAsc,
    #[strum(to_string = "ta_p_wedgesupport", serialize = "TRIANGLE_DESC")]
    TriangleDesc,
    #[strum(to_string = "ta_p_wedge", serialize = "WEDGE")]
    Wedge,
    #[strum(to_string = "ta_p_channelup", serialize = "CHANNEL_UP")]
    ChannelUp,
    #[strum(to_string = "ta_p_channeldown", serialize = "CHANNEL_DOWN")]
    ChannelDown,
    #[strum(to_string = "ta_p_channel", serialize = "CHANNEL")]
    Channel,
    #[strum(to_string = "ta_p_doubletop", serialize = "DOUBLE_TOP")]
    DoubleTop,
    #[strum(to_string = "ta_p_doublebottom", serialize = "DOUBLE_BOTTOM")]
    DoubleBottom,
    #[strum(to_string = "ta_p_multipletop", serialize = "MULTIPLE_TOP")]
    MultipleTop,
    #[strum(to_string = "ta_p_multiplebottom", serialize = "MULTIPLE_BOTTOM")]
    MultipleBottom,
    #[strum(to_string = "ta_p_headandshoulders", serialize = "HEAD_AND_SHOULDERS")]
    HeadAndShoulders,
    #[strum(
        to_string = "ta_p_headandshouldersinv",
        serialize = "HEAD_AND_SHOULDERS_INVERSE"
    )]
    HeadAndShouldersInverse,
}

#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Table {
    #[default]
    #[strum(to_string = "111", serialize = "OVERVIEW")]
    Overview,
}

#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Order {
    #[default]
    #[strum(to_string = "ticker", serialize = "TICKER_ASC")]
    TickerAsc,
    #[strum(to_string = "-ticker", serialize = "TICKER_DESC")]
    TickerDesc,
    #[strum(to_string = "company", serialize = "COMPANY_ASC")]
    CompanyAsc,
    #[strum(to_string = "-company", serialize = "COMPANY_DESC")]
    CompanyDesc,
    #[strum(to_string = "sector", serialize = "SECTOR_ASC")]
    SectorAsc,
    #[strum(to_string = "-sector", serialize = "SECTOR_DESC")]
    SectorDesc,
    #[strum(to_string = "industry", serialize = "INDUSTRY_ASC")]
    IndustryAsc,
    #[strum(to_string = "-industry", serialize = "INDUSTRY_DESC")]
    IndustryDesc,
    #[strum(to_string = "country", serialize = "COUNTRY_ASC")]
    CountryAsc,
    #[strum(to_string = "-country", serialize = "COUNTRY_DESC")]
    CountryDesc,
    #[strum(to_string = "marketcap", serialize = "MARKETCAP_ASC")]
    MarketCapAsc,
    #[strum(to_string = "-marketcap", serialize = "MARKETCAP_DESC")]
    MarketCapDesc,
    #[strum(to_string = "pe", serialize = "PE_ASC")]
    PeAsc,
    #[strum(to_string = "-pe", serialize = "PE_DESC")]
    PeDesc,
    #[strum(to_string = "price", serialize = "PRICE_ASC")]
    PriceAsc,
    #[strum(to_string = "-price", serialize = "PRICE_DESC")]
    PriceDesc,
    #[strum(to_string = "change", serialize = "CHANGE_ASC")]
    ChangeAsc,
    #[strum(to_string = "-change", serialize = "CHANGE_DESC")]
    ChangeDesc,
    #[strum(to_string = "volume", serialize = "VOLUME_ASC")]
    VolumeAsc,
    #[strum(to_string = "-volume", serialize = "VOLUME_DESC")]
    VolumeDesc,
}

/// Comma-separated wire codes of every variant, for error messages.
pub fn allowed_values<T: IntoEnumIterator + Display>() -> String {
    T::iter()
        .map(|choice| choice.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a filter value, failing with the full list of allowed codes.
pub fn parse_choice<T>(field: &'static str, value: &str) -> Result<T, ValidationError>
where
    T: FromStr + IntoEnumIterator + Display,
{
    T::from_str(value.trim()).map_err(|_| ValidationError::InvalidChoice {
        field,
        value: value.to_string(),
        allowed: allowed_values::<T>(),
    })
}
