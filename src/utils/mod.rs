//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 입력 정리, 검색어 이스케이프
//! - [`localizer`] - 메시지 키 번역

pub mod localizer;
pub mod string_utils;
