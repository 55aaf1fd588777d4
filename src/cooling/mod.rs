//! 공조 부하 관련 계산 모듈을 모아둔다.
//! 현재는 코일 현열/잠열 부하 계산으로 구성한다.

pub mod coil_load;
