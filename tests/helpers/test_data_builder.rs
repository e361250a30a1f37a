// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use packline_qc::domain::{LineRecord, PackagingRecord};

fn default_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("测试日期非法")
}

// ==========================================
// LineRecord 构建器
// ==========================================

pub struct LineRecordBuilder {
    plant: String,
    line: String,
    equipment: String,
    date_start: NaiveDate,
    date_end: NaiveDate,
    efficiency_ccw: Option<f64>,
    efficiency_atlas: Option<f64>,
    std_deviation: Option<f64>,
    good_units: i64,
    overweight_units: i64,
}

impl LineRecordBuilder {
    pub fn new(plant: &str) -> Self {
        Self {
            plant: plant.to_string(),
            line: "L1".to_string(),
            equipment: "CCW-01".to_string(),
            date_start: default_date("2024-01-10"),
            date_end: default_date("2024-01-10"),
            efficiency_ccw: None,
            efficiency_atlas: None,
            std_deviation: None,
            good_units: 0,
            overweight_units: 0,
        }
    }

    pub fn line(mut self, line: &str) -> Self {
        self.line = line.to_string();
        self
    }

    pub fn equipment(mut self, equipment: &str) -> Self {
        self.equipment = equipment.to_string();
        self
    }

    pub fn dates(mut self, start: &str, end: &str) -> Self {
        self.date_start = default_date(start);
        self.date_end = default_date(end);
        self
    }

    pub fn efficiency_ccw(mut self, value: f64) -> Self {
        self.efficiency_ccw = Some(value);
        self
    }

    pub fn efficiency_atlas(mut self, value: f64) -> Self {
        self.efficiency_atlas = Some(value);
        self
    }

    pub fn std_deviation(mut self, value: f64) -> Self {
        self.std_deviation = Some(value);
        self
    }

    pub fn good_units(mut self, units: i64) -> Self {
        self.good_units = units;
        self
    }

    pub fn overweight_units(mut self, units: i64) -> Self {
        self.overweight_units = units;
        self
    }

    pub fn build(self) -> LineRecord {
        LineRecord {
            id: None,
            plant: self.plant,
            line: self.line,
            equipment: self.equipment,
            date_start: self.date_start,
            date_end: self.date_end,
            efficiency_ccw: self.efficiency_ccw,
            efficiency_atlas: self.efficiency_atlas,
            std_deviation: self.std_deviation,
            good_units: self.good_units,
            overweight_units: self.overweight_units,
        }
    }
}

// ==========================================
// PackagingRecord 构建器
// ==========================================

pub struct PackagingRecordBuilder {
    linked_line: Option<i64>,
    plant: String,
    line: String,
    equipment: String,
    date_start: NaiveDate,
    date_end: NaiveDate,
    efficiency_tsc: Option<f64>,
    good_bags: i64,
    leak_bags: i64,
    flat_bags: i64,
    double_bags: i64,
    thick_bags: i64,
}

impl PackagingRecordBuilder {
    pub fn new(plant: &str) -> Self {
        Self {
            linked_line: None,
            plant: plant.to_string(),
            line: "L1".to_string(),
            equipment: "TSC-01".to_string(),
            date_start: default_date("2024-01-10"),
            date_end: default_date("2024-01-10"),
            efficiency_tsc: None,
            good_bags: 0,
            leak_bags: 0,
            flat_bags: 0,
            double_bags: 0,
            thick_bags: 0,
        }
    }

    pub fn linked_line(mut self, ccw_id: i64) -> Self {
        self.linked_line = Some(ccw_id);
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.line = line.to_string();
        self
    }

    pub fn equipment(mut self, equipment: &str) -> Self {
        self.equipment = equipment.to_string();
        self
    }

    pub fn dates(mut self, start: &str, end: &str) -> Self {
        self.date_start = default_date(start);
        self.date_end = default_date(end);
        self
    }

    pub fn efficiency_tsc(mut self, value: f64) -> Self {
        self.efficiency_tsc = Some(value);
        self
    }

    pub fn good_bags(mut self, bags: i64) -> Self {
        self.good_bags = bags;
        self
    }

    pub fn defects(mut self, leak: i64, flat: i64, double: i64, thick: i64) -> Self {
        self.leak_bags = leak;
        self.flat_bags = flat;
        self.double_bags = double;
        self.thick_bags = thick;
        self
    }

    pub fn build(self) -> PackagingRecord {
        PackagingRecord {
            id: None,
            linked_line: self.linked_line,
            plant: self.plant,
            line: self.line,
            equipment: self.equipment,
            date_start: self.date_start,
            date_end: self.date_end,
            efficiency_tsc: self.efficiency_tsc,
            good_bags: self.good_bags,
            leak_bags: self.leak_bags,
            flat_bags: self.flat_bags,
            double_bags: self.double_bags,
            thick_bags: self.thick_bags,
        }
    }
}
