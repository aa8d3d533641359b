pub struct Md5Encoder;

pub trait PassWordAnalyze {
    /// 字符加密
    fn encode(raw_pwd: &str) -> String;

    /// 检验密码
    /// input 登录时输入的明文密码
    /// stored 已保存的 md5
    fn verify(input: &str, stored: &str) -> bool;
}

impl PassWordAnalyze for Md5Encoder {
    fn encode(raw_pwd: &str) -> String {
        format!("{:x}", md5::compute(raw_pwd))
    }

    fn verify(input: &str, stored: &str) -> bool {
        stored.eq(&Md5Encoder::encode(input))
    }
}
