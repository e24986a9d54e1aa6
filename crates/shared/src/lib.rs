use serde::{Deserialize, Serialize};

/// Уникальный идентификатор размещённой фигуры
pub type ShapeId = String;

/// Параметры прямоугольного блока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxParams {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Параметры цилиндра (усечённого конуса при разных диаметрах)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CylinderParams {
    pub height: f64,
    pub diameter_top: f64,
    pub diameter_bottom: f64,
    /// Лежачий цилиндр: ось вдоль Z, используется только нижняя половина
    #[serde(default)]
    pub is_horizontal: bool,
}

/// Параметры эллипсоида (используется нижняя половина)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereParams {
    pub diameter_x: f64,
    pub diameter_y: f64,
    pub diameter_z: f64,
}

/// Параметры выдавленного текста
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextParams {
    pub text: String,
    pub size: f64,
    pub depth: f64,
}

/// Тип фигуры вместе с её размерами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeParams {
    Box(BoxParams),
    Cylinder(CylinderParams),
    Sphere(SphereParams),
    Text(TextParams),
    /// Фигура без известного правила построения
    Unknown,
}

impl ShapeParams {
    /// Префикс для имени фигуры ("box", "cylinder", ...)
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeParams::Box(_) => "box",
            ShapeParams::Cylinder(_) => "cylinder",
            ShapeParams::Sphere(_) => "sphere",
            ShapeParams::Text(_) => "text",
            ShapeParams::Unknown => "unknown",
        }
    }

    /// Человекочитаемое описание размеров
    pub fn describe(&self) -> String {
        match self {
            ShapeParams::Box(b) => format!("Box {}×{}×{}", b.width, b.height, b.depth),
            ShapeParams::Cylinder(c) => format!(
                "Cylinder h={} ⌀{}/{}{}",
                c.height,
                c.diameter_top,
                c.diameter_bottom,
                if c.is_horizontal { " (horizontal)" } else { "" }
            ),
            ShapeParams::Sphere(s) => {
                format!("Sphere ⌀{}/{}/{}", s.diameter_x, s.diameter_y, s.diameter_z)
            }
            ShapeParams::Text(t) => format!("Text \"{}\" {}×{}", t.text, t.size, t.depth),
            ShapeParams::Unknown => "Unknown".to_string(),
        }
    }
}

/// Режим привязки при перетаскивании (режимы взаимоисключающие)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    #[default]
    None,
    /// Привязка вершина-к-вершине
    Vertex,
    /// Выравнивание по линиям вдоль осей X и Z
    Line,
}

impl SnapMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            SnapMode::None => "Off",
            SnapMode::Vertex => "Vertex",
            SnapMode::Line => "Line",
        }
    }

    pub fn all() -> &'static [SnapMode] {
        &[SnapMode::None, SnapMode::Vertex, SnapMode::Line]
    }
}

/// Ось плоскости земли, вдоль которой строится линия выравнивания
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Индекс компоненты в [x, y, z]
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Z => 2,
        }
    }

    pub fn both() -> [Axis; 2] {
        [Axis::X, Axis::Z]
    }
}
