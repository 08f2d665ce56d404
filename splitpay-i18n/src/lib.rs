#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const PERSON: &str = "メンバー";
    pub const AMOUNT_OWED: &str = "支払額";
    pub const BILL_SHARE: &str = "会計の負担分";
    pub const CONTRIBUTION_SHARE: &str = "個別・共有分";
    pub const TAX_SHARE: &str = "税の負担分";
    pub const SPLIT_EVENLY: &str = "均等割り (会計 + 税)";
    pub const SPLIT_BY_CONTRIBUTION: &str = "注文ごと (税は均等割り)";
    pub const NOTHING_TO_CALCULATE: &str = "計算する参加者がいません";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const PERSON: &str = "Person";
    pub const AMOUNT_OWED: &str = "Amount Owed";
    pub const BILL_SHARE: &str = "Bill Share";
    pub const CONTRIBUTION_SHARE: &str = "Individual/Shared";
    pub const TAX_SHARE: &str = "Tax Share";
    pub const SPLIT_EVENLY: &str = "Split Evenly (Total Bill + Tax)";
    pub const SPLIT_BY_CONTRIBUTION: &str = "Split by Contribution (Tax Evenly)";
    pub const NOTHING_TO_CALCULATE: &str = "There is nobody to split the bill with";
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub mod strings {
    pub const PERSON: &str = "Person";
    pub const AMOUNT_OWED: &str = "Amount Owed";
    pub const BILL_SHARE: &str = "Bill Share";
    pub const CONTRIBUTION_SHARE: &str = "Individual/Shared";
    pub const TAX_SHARE: &str = "Tax Share";
    pub const SPLIT_EVENLY: &str = "Split Evenly (Total Bill + Tax)";
    pub const SPLIT_BY_CONTRIBUTION: &str = "Split by Contribution (Tax Evenly)";
    pub const NOTHING_TO_CALCULATE: &str = "There is nobody to split the bill with";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn unassigned_shared_cost(amount: impl std::fmt::Display) -> String {
    format!("共有者のいない共有アイテム {amount} は誰にも請求されていません")
}

#[cfg(feature = "ja")]
pub fn ignored_edit(line: usize) -> String {
    format!("行 {line}: 存在しない参加者またはアイテムへの編集を無視しました")
}

#[cfg(feature = "ja")]
pub fn position_out_of_range(position: u64) -> String {
    format!("位置 {position} は範囲外です")
}

#[cfg(not(feature = "ja"))]
pub fn unassigned_shared_cost(amount: impl std::fmt::Display) -> String {
    format!("Shared items worth {amount} have no sharers and are not charged to anyone")
}

#[cfg(not(feature = "ja"))]
pub fn ignored_edit(line: usize) -> String {
    format!("Line {line}: edit ignored; no such participant or item")
}

#[cfg(not(feature = "ja"))]
pub fn position_out_of_range(position: u64) -> String {
    format!("Position {position} is out of range")
}

pub struct SyntaxErrorMessage {
    line: usize,
    detail: String,
}

pub fn syntax_error(line: usize, detail: String) -> SyntaxErrorMessage {
    SyntaxErrorMessage { line, detail }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "構文エラー (行 {}): {}", self.line, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}
